// ============================================================================
// LOADING BUTTON - Spinner state for submit controls
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use crate::dom::{add_class, get_attribute, remove_class, set_attribute, set_inner_html};
use crate::utils::constants::{LOADING_CLASS, LOADING_LABEL_ATTR, LOADING_MARKUP};
use crate::viewmodels::form::original_label;

fn set_disabled(button: &Element, disabled: bool) {
    if let Some(b) = button.dyn_ref::<HtmlButtonElement>() {
        b.set_disabled(disabled);
    } else if let Some(input) = button.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    }
}

pub fn is_disabled(button: &Element) -> bool {
    if let Some(b) = button.dyn_ref::<HtmlButtonElement>() {
        return b.disabled();
    }
    button
        .dyn_ref::<HtmlInputElement>()
        .map(|i| i.disabled())
        .unwrap_or(false)
}

/// Disables the button and swaps its label for the spinner. The original
/// label is cached in `data-text` so a second call cannot lose it.
pub fn set_loading(button: &Element, loading: bool) {
    if loading {
        let label = original_label(get_attribute(button, LOADING_LABEL_ATTR), button.inner_html());
        let _ = set_attribute(button, LOADING_LABEL_ATTR, &label);
        set_disabled(button, true);
        let _ = add_class(button, LOADING_CLASS);
        set_inner_html(button, LOADING_MARKUP);
    } else {
        let label = original_label(get_attribute(button, LOADING_LABEL_ATTR), button.inner_html());
        set_disabled(button, false);
        let _ = remove_class(button, LOADING_CLASS);
        set_inner_html(button, &label);
    }
}

/// Disables the button with a custom label (e.g. "Saving changes...").
pub fn set_busy_label(button: &Element, label_html: &str) {
    let label = original_label(get_attribute(button, LOADING_LABEL_ATTR), button.inner_html());
    let _ = set_attribute(button, LOADING_LABEL_ATTR, &label);
    set_disabled(button, true);
    set_inner_html(button, label_html);
}
