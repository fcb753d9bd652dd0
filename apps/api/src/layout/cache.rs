//! Memoization of fit results.
//!
//! `solve` is a pure function of `(text, container)` once the style and the
//! measurer are fixed for the process, so results can be reused across
//! requests. Bounded LRU; capacity 0 turns caching off.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::layout::solver::{Container, FitOutcome, FitResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FitKey {
    text: String,
    width_bits: u32,
    height_bits: u32,
}

impl FitKey {
    fn new(text: &str, container: Container) -> Self {
        FitKey {
            text: text.to_string(),
            width_bits: container.width.to_bits(),
            height_bits: container.height.to_bits(),
        }
    }
}

pub struct FitCache {
    entries: Option<Mutex<LruCache<FitKey, FitResult>>>,
}

impl FitCache {
    pub fn new(capacity: usize) -> Self {
        FitCache {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Returns the cached result or computes, stores and returns a fresh one.
    ///
    /// Results from a failed measurement are returned but not stored, so the
    /// next call retries.
    pub fn get_or_solve<F>(&self, text: &str, container: Container, solve: F) -> FitResult
    where
        F: FnOnce() -> FitResult,
    {
        let Some(entries) = &self.entries else {
            return solve();
        };

        let key = FitKey::new(text, container);
        if let Some(hit) = entries.lock().get(&key) {
            return *hit;
        }

        // Lock is not held while solving; a concurrent miss on the same key
        // computes the same value twice.
        let result = solve();
        if result.outcome != FitOutcome::MeasureFailed {
            entries.lock().put(key, result);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.lock().len())
    }
}
