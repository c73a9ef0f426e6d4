// ============================================================================
// FORM VIEWMODEL - Submit lifecycle shared by every page form
// ============================================================================
// Idle -> Validating -> Submitting -> Succeeded | Failed, and a new submit
// starts over from the last state. Validation failures drop back to Idle.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::utils::constants::DEFAULT_MESSAGE_CONTAINER;
use crate::utils::validation::{FormErrors, ValidationError};
use crate::viewmodels::message::MessageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, FormPhase::Validating | FormPhase::Submitting)
    }
}

/// Double-submit protection for one form.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    phase: Rc<Cell<FormPhase>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase.get()
    }

    /// Starts validation. `false` means a submit is already in progress
    /// and this one must be ignored.
    pub fn begin(&self) -> bool {
        if self.phase.get().is_busy() {
            log::debug!("🔍 [FORM] submit ignored, request in flight");
            return false;
        }
        self.phase.set(FormPhase::Validating);
        true
    }

    pub fn rejected(&self) {
        self.phase.set(FormPhase::Idle);
    }

    pub fn submitting(&self) {
        self.phase.set(FormPhase::Submitting);
    }

    pub fn finish(&self, succeeded: bool) {
        self.phase.set(if succeeded {
            FormPhase::Succeeded
        } else {
            FormPhase::Failed
        });
    }
}

/// Where an outcome's message goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    /// The page's `message-container`.
    Default,
    Container(&'static str),
    /// Separate success and error alert boxes; only one is visible at a time.
    Alerts {
        success: &'static str,
        error: &'static str,
    },
}

impl MessageTarget {
    /// Every element that may still show an earlier message for this form.
    pub fn slots(&self) -> Vec<&'static str> {
        match *self {
            MessageTarget::Default => vec![DEFAULT_MESSAGE_CONTAINER],
            MessageTarget::Container(id) => vec![id],
            MessageTarget::Alerts { success, error } => vec![success, error],
        }
    }

    /// `(shown, hidden)` alert ids for an outcome; `None` for containers.
    pub fn alert_pair(&self, is_error: bool) -> Option<(&'static str, &'static str)> {
        match *self {
            MessageTarget::Alerts { success, error } if is_error => Some((error, success)),
            MessageTarget::Alerts { success, error } => Some((success, error)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: Navigation,
    pub delay_ms: u32,
}

/// Result of a page's load-time guard: the value the form is prefilled
/// with, or the URL to leave for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEntry {
    Ready(String),
    Leave(String),
}

/// What a form handler wants the page to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub message: Option<String>,
    pub kind: MessageKind,
    pub redirect: Option<Redirect>,
    pub focus: Option<String>,
    pub invalid_fields: Vec<String>,
    pub reset_form: bool,
}

impl FormOutcome {
    fn with(kind: MessageKind, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            kind,
            redirect: None,
            focus: None,
            invalid_fields: Vec::new(),
            reset_form: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with(MessageKind::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with(MessageKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with(MessageKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with(MessageKind::Warning, message)
    }

    /// Outcome with only field marks and no message.
    pub fn silent_error(invalid_fields: Vec<String>) -> Self {
        Self {
            message: None,
            kind: MessageKind::Error,
            redirect: None,
            focus: None,
            invalid_fields,
            reset_form: false,
        }
    }

    pub fn redirect_to(mut self, url: impl Into<String>, delay_ms: u32) -> Self {
        self.redirect = Some(Redirect {
            target: Navigation::To(url.into()),
            delay_ms,
        });
        self
    }

    pub fn reload_after(mut self, delay_ms: u32) -> Self {
        self.redirect = Some(Redirect {
            target: Navigation::Reload,
            delay_ms,
        });
        self
    }

    pub fn focus(mut self, field: &str) -> Self {
        self.focus = Some(field.to_string());
        self
    }

    pub fn mark_invalid(mut self, field: &str) -> Self {
        self.invalid_fields.push(field.to_string());
        self
    }

    pub fn reset(mut self) -> Self {
        self.reset_form = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match &self.redirect {
            Some(Redirect {
                target: Navigation::To(url),
                ..
            }) => Some(url),
            _ => None,
        }
    }
}

impl From<FormErrors> for FormOutcome {
    fn from(errors: FormErrors) -> Self {
        let mut outcome = FormOutcome::error(errors.error.to_string());
        outcome.invalid_fields = errors.invalid_fields.into_iter().collect();
        outcome
    }
}

impl From<ValidationError> for FormOutcome {
    fn from(error: ValidationError) -> Self {
        FormOutcome::error(error.to_string())
    }
}

/// Label restored after loading: the cached `data-text` wins over the
/// button's current text, which may already be the spinner.
pub fn original_label(cached: Option<String>, current: String) -> String {
    cached.filter(|c| !c.is_empty()).unwrap_or(current)
}
