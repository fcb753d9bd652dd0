//! Scoped measurement probes.
//!
//! A probe stands for the transient layout resource one measurement needs: an
//! off-screen element in a browser, a scratch layout in a font library. It is
//! acquired at the top of a `measure` call and released when the guard drops,
//! which covers normal returns, `?` propagation and unwinding alike. Probes are
//! never held across calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Default)]
struct Counters {
    outstanding: AtomicUsize,
    acquired: AtomicUsize,
}

/// Shared accounting for the probes a measurer hands out.
///
/// Cloning yields a handle onto the same counters.
#[derive(Debug, Clone, Default)]
pub struct ProbeLedger {
    counters: Arc<Counters>,
}

/// Point-in-time view of a ledger, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeStats {
    pub outstanding: usize,
    pub acquired: usize,
}

impl ProbeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a probe. Released when the returned guard is dropped.
    pub fn acquire(&self) -> Probe<'_> {
        self.counters.outstanding.fetch_add(1, Ordering::AcqRel);
        self.counters.acquired.fetch_add(1, Ordering::Relaxed);
        Probe { ledger: self }
    }

    /// Probes currently held. Zero whenever no measurement is running.
    pub fn outstanding(&self) -> usize {
        self.counters.outstanding.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> ProbeStats {
        ProbeStats {
            outstanding: self.outstanding(),
            acquired: self.counters.acquired.load(Ordering::Relaxed),
        }
    }
}

/// Guard for one acquired probe.
#[must_use = "a probe is released as soon as it is dropped"]
pub struct Probe<'a> {
    ledger: &'a ProbeLedger,
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.ledger
            .counters
            .outstanding
            .fetch_sub(1, Ordering::AcqRel);
    }
}
