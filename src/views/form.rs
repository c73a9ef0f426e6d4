// ============================================================================
// FORM VIEW - Submit wiring and FormOutcome application
// ============================================================================
// Every page form goes through bind_submit: guard, validate, spinner, call,
// restore, then apply whatever outcome the viewmodel returned.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    add_class, focus, get_element_by_id, navigate, on_submit, query_selector_all, reload,
    remove_class, reset_form,
};
use crate::views::button::{is_disabled, set_loading};
use crate::views::message::{clear_message, hide_alert, show_alert, show_message};
use crate::viewmodels::form::{FormOutcome, Navigation, Redirect, SubmitGuard};

pub use crate::viewmodels::form::MessageTarget;

const INVALID_CLASS: &str = "is-invalid";

fn show_outcome_message(message: &str, outcome: &FormOutcome, target: MessageTarget) {
    match (target, target.alert_pair(outcome.is_error())) {
        (_, Some((shown, hidden))) => {
            show_alert(shown, message);
            hide_alert(hidden);
        }
        (MessageTarget::Container(id), None) => show_message(message, outcome.kind, Some(id)),
        (_, None) => show_message(message, outcome.kind, None),
    }
}

/// Removes whatever an earlier submit left in the target's boxes.
fn clear_target(target: MessageTarget) {
    for id in target.slots() {
        match target {
            MessageTarget::Alerts { .. } => hide_alert(id),
            _ => clear_message(Some(id)),
        }
    }
}

pub fn submit_button(form: &Element) -> Option<Element> {
    form.query_selector("button[type=\"submit\"], input[type=\"submit\"]")
        .ok()
        .flatten()
}

/// Runs the redirect after its delay. A zero delay navigates right away.
pub fn schedule_redirect(redirect: &Redirect) {
    let target = redirect.target.clone();
    let go = move || match &target {
        Navigation::To(url) => navigate(url),
        Navigation::Reload => reload(),
    };
    if redirect.delay_ms == 0 {
        go();
    } else {
        Timeout::new(redirect.delay_ms, go).forget();
    }
}

fn field_element(form: Option<&Element>, field: &str) -> Option<Element> {
    get_element_by_id(field).or_else(|| {
        form?
            .query_selector(&format!("[name=\"{}\"]", field))
            .ok()
            .flatten()
    })
}

pub fn clear_invalid(form: &Element) {
    for control in query_selector_all(Some(form), ".is-invalid").unwrap_or_default() {
        let _ = remove_class(&control, INVALID_CLASS);
    }
}

/// Applies an outcome to the page: field marks, message, focus, reset
/// and the scheduled navigation.
pub fn apply_outcome(form: Option<&Element>, outcome: &FormOutcome, target: MessageTarget) {
    for field in &outcome.invalid_fields {
        if let Some(control) = field_element(form, field) {
            let _ = add_class(&control, INVALID_CLASS);
        }
    }
    if let Some(message) = &outcome.message {
        show_outcome_message(message, outcome, target);
    }
    if let Some(field) = &outcome.focus {
        focus(field);
    }
    if outcome.reset_form {
        if let Some(form) = form {
            reset_form(form);
        }
    }
    if let Some(redirect) = &outcome.redirect {
        schedule_redirect(redirect);
    }
}

/// Wires a form's submit event.
///
/// `validate` reads the form and either returns the input for `submit` or a
/// rejection shown without any network call. While `submit` runs, the submit
/// button carries the spinner and further submits are ignored.
pub fn bind_submit<T, V, S, Fut>(
    form: &Element,
    target: MessageTarget,
    validate: V,
    submit: S,
) -> Result<(), JsValue>
where
    T: 'static,
    V: Fn(&Element) -> Result<T, FormOutcome> + 'static,
    S: Fn(T) -> Fut + 'static,
    Fut: Future<Output = FormOutcome> + 'static,
{
    let guard = SubmitGuard::new();
    let submit = Rc::new(submit);
    let owner = form.clone();

    on_submit(form, move |_event| {
        let button = submit_button(&owner);
        if button.as_ref().map(is_disabled).unwrap_or(false) || !guard.begin() {
            return;
        }
        clear_invalid(&owner);
        clear_target(target);

        let input = match validate(&owner) {
            Ok(input) => input,
            Err(rejection) => {
                guard.rejected();
                apply_outcome(Some(&owner), &rejection, target);
                return;
            }
        };

        guard.submitting();
        if let Some(button) = &button {
            set_loading(button, true);
        }

        let guard = guard.clone();
        let submit = submit.clone();
        let form = owner.clone();
        spawn_local(async move {
            let outcome = submit(input).await;
            if let Some(button) = &button {
                set_loading(button, false);
            }
            guard.finish(!outcome.is_error());
            apply_outcome(Some(&form), &outcome, target);
        });
    })
}
