// ============================================================================
// ELEMENT HELPERS - Lookups, classes, inputs and navigation
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window,
};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn exists(id: &str) -> bool {
    get_element_by_id(id).is_some()
}

/// First match for a CSS selector; `None` when nothing matches.
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

/// Every element matching `selector` under `root` (the whole document when `None`).
pub fn query_selector_all(root: Option<&Element>, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = match root {
        Some(root) => root.query_selector_all(selector)?,
        None => document()
            .ok_or_else(|| JsValue::from_str("No document"))?
            .query_selector_all(selector)?,
    };
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

pub fn get_attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Toggles `display` between the stylesheet default and `none`.
pub fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    let html = element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlElement"))?;
    if visible {
        html.style().remove_property("display").map(|_| ())
    } else {
        html.style().set_property("display", "none")
    }
}

pub fn show_by_id(id: &str, visible: bool) {
    if let Some(element) = get_element_by_id(id) {
        if let Err(e) = set_visible(&element, visible) {
            log::warn!("⚠️ [DOM] cannot toggle #{}: {:?}", id, e);
        }
    }
}

pub fn focus(id: &str) {
    if let Some(element) = get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        let _ = element.focus();
    }
}

// ============================================================================
// FORM CONTROLS
// ============================================================================

/// Current value of an input, select or textarea.
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    element.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
}

/// Value of the control with id `id`; empty when missing.
pub fn value_of(id: &str) -> String {
    optional_value_of(id).unwrap_or_default()
}

/// `None` when the page did not render the control.
pub fn optional_value_of(id: &str) -> Option<String> {
    get_element_by_id(id).as_ref().and_then(control_value)
}

pub fn set_value_of(id: &str, value: &str) {
    if let Some(element) = get_element_by_id(id) {
        set_control_value(&element, value);
    }
}

pub fn set_control_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// `(name, value)` pairs of every named control in `form`, in document order.
pub fn form_pairs(form: &Element) -> Vec<(String, String)> {
    query_selector_all(Some(form), "input[name], select[name], textarea[name]")
        .unwrap_or_default()
        .iter()
        .filter_map(|control| {
            let name = control.get_attribute("name")?;
            Some((name, control_value(control)?))
        })
        .collect()
}

pub fn reset_form(form: &Element) {
    if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
        form.reset();
    }
}

// ============================================================================
// LOCATION
// ============================================================================

pub fn location_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn location_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn navigate(url: &str) {
    log::info!("🧭 [DOM] navigating to {}", url);
    if let Some(w) = window() {
        if let Err(e) = w.location().set_href(url) {
            log::error!("❌ [DOM] navigation failed: {:?}", e);
        }
    }
}

pub fn reload() {
    if let Some(w) = window() {
        let _ = w.location().reload();
    }
}

/// Content of `<meta name="...">`, if present and non-empty.
pub fn meta_content(name: &str) -> Option<String> {
    query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|m| m.get_attribute("content"))
        .filter(|c| !c.is_empty())
}
