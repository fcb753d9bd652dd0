//! Display controller — explicit state of the single text screen.
//!
//! Owns the view mode, theme, text and container, plus the fit currently
//! shown. Events are applied synchronously and report whether the fit has to
//! be recomputed; the caller runs the solver and hands the result back with
//! the revision it was computed for. A result for an older revision is
//! dropped, so the newest text or size always wins.

use serde::{Deserialize, Serialize};

use crate::layout::solver::{Container, FitOutcome, FitResult, DEFAULT_FONT_SIZE_PX};

// ────────────────────────────────────────────────────────────────────────────
// State types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Text is being typed.
    Editing,
    /// Text is shown full-screen at the fitted size.
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Dark from 18:00 until 06:00, light otherwise.
    pub fn for_hour(hour: u32) -> Self {
        if hour >= 18 || hour < 6 {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyName {
    Enter,
    Escape,
    #[serde(other)]
    Other,
}

/// Everything that can happen to the screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayEvent {
    TextChanged {
        text: String,
    },
    Resized {
        width: f32,
        height: f32,
    },
    /// Editing → display. Ignored while the text is blank.
    Submit,
    /// Display → editing.
    Back,
    ToggleTheme,
    /// Raw key press; Ctrl/Cmd+Enter submits, Escape goes back.
    Key {
        key: KeyName,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
}

/// What an event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Change {
    pub refit: bool,
    pub view_changed: bool,
    pub theme_changed: bool,
}

/// Inputs for one solver run, tagged with the revision they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct RefitRequest {
    pub revision: u64,
    pub text: String,
    pub container: Container,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    pub view: View,
    pub theme: Theme,
    pub text: String,
    pub container: Container,
    pub font_size_px: f32,
    pub fit: FitResult,
    pub revision: u64,
    /// True while the shown fit belongs to an older revision.
    pub fit_pending: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DisplayController {
    view: View,
    theme: Theme,
    text: String,
    container: Container,
    fit: FitResult,
    revision: u64,
    fitted_revision: u64,
    /// Submit arrived while a fit was pending; switch views once it lands.
    submit_deferred: bool,
}

impl DisplayController {
    /// Starts in the editing view with no text, which needs no fit.
    pub fn new(container: Container, theme: Theme) -> Self {
        DisplayController {
            view: View::Editing,
            theme,
            text: String::new(),
            container,
            fit: FitResult {
                font_size_px: DEFAULT_FONT_SIZE_PX,
                outcome: FitOutcome::Empty,
                candidates_tried: 0,
            },
            revision: 0,
            fitted_revision: 0,
            submit_deferred: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn apply(&mut self, event: DisplayEvent) -> Change {
        match event {
            DisplayEvent::TextChanged { text } => {
                if text == self.text {
                    return Change::default();
                }
                self.text = text;
                self.invalidate()
            }
            DisplayEvent::Resized { width, height } => match Container::new(width, height) {
                Some(container) if container != self.container => {
                    self.container = container;
                    self.invalidate()
                }
                _ => Change::default(),
            },
            DisplayEvent::Submit => self.submit(),
            DisplayEvent::Back => self.back(),
            DisplayEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                Change {
                    theme_changed: true,
                    ..Change::default()
                }
            }
            DisplayEvent::Key { key, ctrl, meta } => match (key, self.view) {
                (KeyName::Enter, View::Editing) if ctrl || meta => self.submit(),
                (KeyName::Escape, View::Display) => self.back(),
                _ => Change::default(),
            },
        }
    }

    fn invalidate(&mut self) -> Change {
        self.revision += 1;
        Change {
            refit: true,
            ..Change::default()
        }
    }

    fn submit(&mut self) -> Change {
        if self.view != View::Editing || self.text.trim().is_empty() {
            return Change::default();
        }
        // The display view never shows text without a size for it.
        if self.fit_pending() {
            self.submit_deferred = true;
            return Change::default();
        }
        self.view = View::Display;
        Change {
            view_changed: true,
            ..Change::default()
        }
    }

    fn back(&mut self) -> Change {
        self.submit_deferred = false;
        if self.view != View::Display {
            return Change::default();
        }
        self.view = View::Editing;
        Change {
            view_changed: true,
            ..Change::default()
        }
    }

    pub fn fit_pending(&self) -> bool {
        self.fitted_revision != self.revision
    }

    pub fn refit_request(&self) -> RefitRequest {
        RefitRequest {
            revision: self.revision,
            text: self.text.clone(),
            container: self.container,
        }
    }

    /// Installs a fit computed for `revision`, completing a deferred submit.
    /// Returns false, leaving the state untouched, if newer changes have
    /// happened since.
    pub fn apply_fit(&mut self, revision: u64, fit: FitResult) -> bool {
        if revision != self.revision {
            return false;
        }
        self.fit = fit;
        self.fitted_revision = revision;
        if std::mem::take(&mut self.submit_deferred) {
            self.submit();
        }
        true
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            view: self.view,
            theme: self.theme,
            text: self.text.clone(),
            container: self.container,
            font_size_px: self.fit.font_size_px,
            fit: self.fit,
            revision: self.revision,
            fit_pending: self.fit_pending(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DisplayController {
        DisplayController::new(Container::new(800.0, 600.0).unwrap(), Theme::Light)
    }

    fn fitted(size: f32) -> FitResult {
        FitResult {
            font_size_px: size,
            outcome: FitOutcome::Fitted,
            candidates_tried: 3,
        }
    }

    fn text(s: &str) -> DisplayEvent {
        DisplayEvent::TextChanged {
            text: s.to_string(),
        }
    }

    /// Changes the text and installs a fit for it.
    fn type_fitted(display: &mut DisplayController, s: &str) {
        display.apply(text(s));
        let revision = display.refit_request().revision;
        assert!(display.apply_fit(revision, fitted(120.0)));
    }

    #[test]
    fn test_initial_state_has_defined_size() {
        let display = controller();
        let snapshot = display.snapshot();
        assert_eq!(snapshot.view, View::Editing);
        assert_eq!(snapshot.font_size_px, DEFAULT_FONT_SIZE_PX);
        assert!(!snapshot.fit_pending);
    }

    #[test]
    fn test_theme_for_hour() {
        assert_eq!(Theme::for_hour(5), Theme::Dark);
        assert_eq!(Theme::for_hour(6), Theme::Light);
        assert_eq!(Theme::for_hour(17), Theme::Light);
        assert_eq!(Theme::for_hour(18), Theme::Dark);
        assert_eq!(Theme::for_hour(23), Theme::Dark);
    }

    #[test]
    fn test_text_change_requests_refit() {
        let mut display = controller();
        let change = display.apply(text("HELLO"));
        assert!(change.refit);
        assert!(display.fit_pending());

        let request = display.refit_request();
        assert_eq!(request.text, "HELLO");
        assert!(display.apply_fit(request.revision, fitted(207.0)));
        assert!(!display.fit_pending());
        assert_eq!(display.snapshot().font_size_px, 207.0);
    }

    #[test]
    fn test_unchanged_text_is_noop() {
        let mut display = controller();
        display.apply(text("same"));
        assert_eq!(display.apply(text("same")), Change::default());
    }

    #[test]
    fn test_resize_requests_refit() {
        let mut display = controller();
        let change = display.apply(DisplayEvent::Resized {
            width: 400.0,
            height: 300.0,
        });
        assert!(change.refit);
        assert_eq!(display.refit_request().container, Container::new(400.0, 300.0).unwrap());

        // Same size again, or an invalid one, changes nothing.
        let same = DisplayEvent::Resized {
            width: 400.0,
            height: 300.0,
        };
        assert_eq!(display.apply(same), Change::default());
        let invalid = DisplayEvent::Resized {
            width: -1.0,
            height: 300.0,
        };
        assert_eq!(display.apply(invalid), Change::default());
    }

    #[test]
    fn test_stale_fit_is_dropped() {
        let mut display = controller();
        display.apply(text("first"));
        let stale = display.refit_request();
        display.apply(text("second"));
        let fresh = display.refit_request();

        assert!(!display.apply_fit(stale.revision, fitted(300.0)));
        assert!(display.fit_pending());
        assert!(display.apply_fit(fresh.revision, fitted(150.0)));
        assert_eq!(display.snapshot().font_size_px, 150.0);
    }

    #[test]
    fn test_submit_requires_text() {
        let mut display = controller();
        assert_eq!(display.apply(DisplayEvent::Submit), Change::default());
        type_fitted(&mut display, "   ");
        assert_eq!(display.apply(DisplayEvent::Submit), Change::default());
        assert_eq!(display.view(), View::Editing);

        type_fitted(&mut display, "go big");
        assert!(display.apply(DisplayEvent::Submit).view_changed);
        assert_eq!(display.view(), View::Display);
    }

    #[test]
    fn test_submit_waits_for_pending_fit() {
        let mut display = controller();
        display.apply(text("not yet sized"));
        assert_eq!(display.apply(DisplayEvent::Submit), Change::default());
        assert_eq!(display.view(), View::Editing);

        let request = display.refit_request();
        assert!(display.apply_fit(request.revision, fitted(64.0)));
        let snapshot = display.snapshot();
        assert_eq!(snapshot.view, View::Display);
        assert_eq!(snapshot.font_size_px, 64.0);
        assert!(!snapshot.fit_pending);
    }

    #[test]
    fn test_deferred_submit_skips_stale_fit() {
        let mut display = controller();
        display.apply(text("first"));
        let stale = display.refit_request();
        display.apply(DisplayEvent::Submit);
        display.apply(text("second"));

        assert!(!display.apply_fit(stale.revision, fitted(300.0)));
        assert_eq!(display.view(), View::Editing);

        let fresh = display.refit_request();
        assert!(display.apply_fit(fresh.revision, fitted(150.0)));
        assert_eq!(display.view(), View::Display);
        assert_eq!(display.snapshot().text, "second");
    }

    #[test]
    fn test_deferred_submit_dropped_when_text_blanked() {
        let mut display = controller();
        display.apply(text("gone soon"));
        display.apply(DisplayEvent::Submit);
        type_fitted(&mut display, "  ");
        assert_eq!(display.view(), View::Editing);
    }

    #[test]
    fn test_back_returns_to_editing() {
        let mut display = controller();
        assert_eq!(display.apply(DisplayEvent::Back), Change::default());
        type_fitted(&mut display, "go big");
        display.apply(DisplayEvent::Submit);
        assert!(display.apply(DisplayEvent::Back).view_changed);
        assert_eq!(display.view(), View::Editing);
    }

    #[test]
    fn test_toggle_theme_any_view() {
        let mut display = controller();
        assert!(display.apply(DisplayEvent::ToggleTheme).theme_changed);
        assert_eq!(display.theme(), Theme::Dark);
        type_fitted(&mut display, "x");
        display.apply(DisplayEvent::Submit);
        assert_eq!(display.view(), View::Display);
        display.apply(DisplayEvent::ToggleTheme);
        assert_eq!(display.theme(), Theme::Light);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut display = controller();
        type_fitted(&mut display, "shout");

        let plain_enter = DisplayEvent::Key {
            key: KeyName::Enter,
            ctrl: false,
            meta: false,
        };
        assert_eq!(display.apply(plain_enter), Change::default());

        let cmd_enter = DisplayEvent::Key {
            key: KeyName::Enter,
            ctrl: false,
            meta: true,
        };
        assert!(display.apply(cmd_enter).view_changed);
        assert_eq!(display.view(), View::Display);

        let escape = DisplayEvent::Key {
            key: KeyName::Escape,
            ctrl: false,
            meta: false,
        };
        assert!(display.apply(escape.clone()).view_changed);
        assert_eq!(display.view(), View::Editing);
        // Escape while editing does nothing.
        assert_eq!(display.apply(escape), Change::default());
    }

    #[test]
    fn test_event_json_shape() {
        let event: DisplayEvent =
            serde_json::from_str(r#"{"type":"key","key":"enter","ctrl":true}"#).unwrap();
        assert_eq!(
            event,
            DisplayEvent::Key {
                key: KeyName::Enter,
                ctrl: true,
                meta: false
            }
        );
        let other: DisplayEvent = serde_json::from_str(r#"{"type":"key","key":"f5"}"#).unwrap();
        assert!(matches!(other, DisplayEvent::Key { key: KeyName::Other, .. }));
        let toggle: DisplayEvent = serde_json::from_str(r#"{"type":"toggle_theme"}"#).unwrap();
        assert_eq!(toggle, DisplayEvent::ToggleTheme);
    }
}
