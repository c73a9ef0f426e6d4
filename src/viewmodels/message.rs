// ============================================================================
// MESSAGE VIEWMODEL - What a message container should show
// ============================================================================
// Pure rendering: the view decides where it goes, this decides what it is.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::utils::format::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    Error,
    Success,
    Warning,
    #[default]
    Info,
}

impl MessageKind {
    /// Unknown values fall back to `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" | "danger" => Self::Error,
            "success" => Self::Success,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Error => "fa-exclamation-triangle",
            Self::Success => "fa-check-circle",
            Self::Warning => "fa-exclamation-circle",
            Self::Info => "fa-info-circle",
        }
    }

    /// Success messages in luxury containers clear themselves; everything else
    /// stays until replaced.
    pub fn auto_clears(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Rendered message: container class plus inner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub kind: MessageKind,
    pub luxury: bool,
    /// Class set on the container element. `None` leaves the container's own classes.
    pub container_class: Option<String>,
    pub html: String,
}

pub fn render_message(text: &str, kind: MessageKind, luxury: bool) -> MessageView {
    let escaped = escape_html(text);
    if luxury {
        MessageView {
            kind,
            luxury,
            container_class: None,
            html: format!(
                "<div class=\"alert-luxury alert-{kind}-luxury\"><i class=\"fas {icon} mr-2\"></i>{text}</div>",
                kind = kind.as_str(),
                icon = kind.icon(),
                text = escaped
            ),
        }
    } else {
        MessageView {
            kind,
            luxury,
            container_class: Some(format!("message {}", kind.as_str())),
            html: escaped,
        }
    }
}

/// Luxury styling applies to the default container and any container
/// that already carries the luxury class.
pub fn uses_luxury_markup(container_id: &str, has_luxury_class: bool) -> bool {
    has_luxury_class || container_id == crate::utils::constants::DEFAULT_MESSAGE_CONTAINER
}

/// Generation counter for one message container.
///
/// Each shown message bumps the generation; a pending auto-clear only fires
/// if no newer message replaced the one it was scheduled for.
#[derive(Debug, Clone, Default)]
pub struct MessageSlot {
    generation: Rc<Cell<u64>>,
}

impl MessageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds() {
        assert_eq!(MessageKind::parse("success"), MessageKind::Success);
        assert_eq!(MessageKind::parse("ERROR"), MessageKind::Error);
        assert_eq!(MessageKind::parse("danger"), MessageKind::Error);
        assert_eq!(MessageKind::parse("warning"), MessageKind::Warning);
        assert_eq!(MessageKind::parse("whatever"), MessageKind::Info);
    }

    #[test]
    fn luxury_markup_carries_kind_and_icon() {
        let view = render_message("Saved", MessageKind::Success, true);
        assert!(view.html.contains("alert-luxury alert-success-luxury"));
        assert!(view.html.contains("fa-check-circle"));
        assert!(view.html.ends_with("</i>Saved</div>"));
        assert_eq!(view.container_class, None);
    }

    #[test]
    fn plain_markup_is_text_with_class() {
        let view = render_message("Bad <input>", MessageKind::Error, false);
        assert_eq!(view.html, "Bad &lt;input&gt;");
        assert_eq!(view.container_class.as_deref(), Some("message error"));
    }

    #[test]
    fn luxury_text_is_escaped() {
        let view = render_message("<script>x</script>", MessageKind::Info, true);
        assert!(!view.html.contains("<script>"));
        assert!(view.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn luxury_selection() {
        assert!(uses_luxury_markup("message-container", false));
        assert!(uses_luxury_markup("reset-message", true));
        assert!(!uses_luxury_markup("reset-message", false));
    }

    #[test]
    fn stale_auto_clear_is_ignored() {
        let slot = MessageSlot::new();
        let first = slot.bump();
        assert!(slot.is_current(first));
        let second = slot.bump();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
        assert!(MessageKind::Success.auto_clears());
        assert!(!MessageKind::Error.auto_clears());
    }
}
