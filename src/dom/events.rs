// ============================================================================
// EVENT HANDLING
// ============================================================================
// Listeners are attached once per page load to server-rendered elements and
// live as long as the page, so their closures are leaked with forget().
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

fn listen<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", move |event: Event| {
        if let Ok(event) = event.dyn_into::<MouseEvent>() {
            handler(event);
        }
    })
}

/// Submit listener; the browser's own submission is always prevented.
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "submit", move |event: Event| {
        event.prevent_default();
        handler(event);
    })
}

/// Submit listener for forms the browser posts itself: the submission goes
/// ahead unless `handler` returns `false`.
pub fn on_checked_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(&Event) -> bool + 'static,
{
    listen(element, "submit", move |event: Event| {
        if !handler(&event) {
            event.prevent_default();
        }
    })
}

pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "input", handler)
}

pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(element, "change", handler)
}

/// Element that raised `event`, walked up to the closest match for `selector`.
/// Used for delegated clicks on rows that are re-rendered.
pub fn closest_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}
