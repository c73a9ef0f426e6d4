// ============================================================================
// MESSAGE VIEW - Puts a MessageView into a container element
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::config::CONFIG;
use crate::dom::{get_element_by_id, has_class, set_inner_html, set_text_content, set_visible};
use crate::utils::constants::{DEFAULT_MESSAGE_CONTAINER, LUXURY_CONTAINER_CLASS};
use crate::viewmodels::message::{render_message, uses_luxury_markup, MessageKind, MessageSlot};

thread_local! {
    static SLOTS: RefCell<HashMap<String, MessageSlot>> = RefCell::new(HashMap::new());
}

fn slot_for(container_id: &str) -> MessageSlot {
    SLOTS.with(|slots| {
        slots
            .borrow_mut()
            .entry(container_id.to_string())
            .or_default()
            .clone()
    })
}

fn scroll_into_view(container: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    container.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Shows `text` in `container_id` (the default container when `None`).
/// Replaces whatever the container showed before.
pub fn show_message(text: &str, kind: MessageKind, container_id: Option<&str>) {
    let id = container_id.unwrap_or(DEFAULT_MESSAGE_CONTAINER);
    let Some(container) = get_element_by_id(id) else {
        log::warn!("⚠️ [MESSAGE] container #{} not found: {}", id, text);
        return;
    };

    let luxury = uses_luxury_markup(id, has_class(&container, LUXURY_CONTAINER_CLASS));
    let view = render_message(text, kind, luxury);
    if let Some(class) = &view.container_class {
        container.set_class_name(class);
    }
    set_inner_html(&container, &view.html);
    if let Err(e) = set_visible(&container, true) {
        log::warn!("⚠️ [MESSAGE] cannot show #{}: {:?}", id, e);
    }
    scroll_into_view(&container);

    let slot = slot_for(id);
    let generation = slot.bump();
    if luxury && kind.auto_clears() {
        let id = id.to_string();
        Timeout::new(CONFIG.message_auto_clear_ms, move || {
            if slot.is_current(generation) {
                clear_message(Some(&id));
            }
        })
        .forget();
    }
}

/// Empties and hides the container.
pub fn clear_message(container_id: Option<&str>) {
    let id = container_id.unwrap_or(DEFAULT_MESSAGE_CONTAINER);
    slot_for(id).bump();
    if let Some(container) = get_element_by_id(id) {
        set_inner_html(&container, "");
        let _ = set_visible(&container, false);
    }
}

/// Bootstrap-style alert box: keeps its own classes, only text and visibility change.
pub fn show_alert(id: &str, text: &str) {
    if let Some(alert) = get_element_by_id(id) {
        set_text_content(&alert, text);
        let _ = set_visible(&alert, true);
    }
}

pub fn hide_alert(id: &str) {
    if let Some(alert) = get_element_by_id(id) {
        let _ = set_visible(&alert, false);
    }
}
