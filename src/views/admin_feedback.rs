// ============================================================================
// ADMIN FEEDBACK VIEW - Feedback table, reply forms and delete buttons
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, closest_target, form_pairs, get_attribute, get_element_by_id, on_click,
    on_submit, query_selector, query_selector_all, set_inner_html, window, ElementBuilder,
};
use crate::viewmodels::admin_feedback::{
    AdminFeedbackViewModel, FeedbackRowView, EMPTY_TABLE_MESSAGE,
};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::FormOutcome;
use crate::views::form::{apply_outcome, MessageTarget};

pub const TABLE_ID: &str = "feedbackTable";
const REPLY_FORM: &str = "form.feedback-reply-form";
const DELETE_BUTTON: &str = "button.delete-feedback[data-id]";
const DELETE_PROMPT: &str = "Delete this feedback?";
const COLUMNS: &str = "7";

fn table_body() -> Option<Element> {
    query_selector(&format!("#{} tbody", TABLE_ID)).ok().flatten()
}

fn render_rows(body: &Element, rows: &[FeedbackRowView]) -> Result<(), JsValue> {
    set_inner_html(body, "");
    if rows.is_empty() {
        let cell = ElementBuilder::new("td")?
            .attr("colspan", COLUMNS)?
            .class("text-center")
            .text(EMPTY_TABLE_MESSAGE)
            .build();
        return append_child(body, &ElementBuilder::new("tr")?.child(cell)?.build());
    }
    for row in rows {
        let mut tr = ElementBuilder::new("tr")?.attr("data-feedback-id", &row.id.to_string())?;
        for cell in row.cells() {
            tr = tr.child(ElementBuilder::new("td")?.html(&cell).build())?;
        }
        append_child(body, &tr.build())?;
    }
    Ok(())
}

/// Failures pop up an alert; the table has no message area of its own.
fn show_outcome(outcome: &FormOutcome) {
    match (&outcome.message, outcome.is_error()) {
        (Some(message), true) => {
            if let Some(w) = window() {
                let _ = w.alert_with_message(message);
            }
        }
        _ => apply_outcome(None, outcome, MessageTarget::Default),
    }
}

fn bind_replies(table: &Element, vm: Rc<AdminFeedbackViewModel>) -> Result<(), JsValue> {
    on_submit(table, move |event| {
        let Some(form) = closest_target(&event, REPLY_FORM) else {
            return;
        };
        let Some(action) = get_attribute(&form, "action").filter(|a| !a.is_empty()) else {
            log::warn!("⚠️ [FEEDBACK] reply form without action");
            return;
        };
        let fields = form_pairs(&form);
        let vm = vm.clone();
        spawn_local(async move {
            show_outcome(&vm.submit_reply(&action, &fields).await);
        });
    })
}

fn bind_deletes(table: &Element, vm: Rc<AdminFeedbackViewModel>) -> Result<(), JsValue> {
    on_click(table, move |event| {
        let Some(button) = closest_target(&event, DELETE_BUTTON) else {
            return;
        };
        let id = get_attribute(&button, "data-id").and_then(|id| id.parse::<i64>().ok());
        let Some(id) = id else {
            return;
        };
        let confirmed = window()
            .and_then(|w| w.confirm_with_message(DELETE_PROMPT).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let vm = vm.clone();
        spawn_local(async move {
            show_outcome(&vm.delete(id).await);
        });
    })
}

pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(table) = get_element_by_id(TABLE_ID) else {
        return Ok(());
    };
    log::info!("📋 [FEEDBACK] table attached");

    let vm = Rc::new(AdminFeedbackViewModel::new(ctx));
    bind_replies(&table, vm.clone())?;
    bind_deletes(&table, vm.clone())?;

    // Server-rendered rows stay; an empty table is filled from the public list.
    if let Some(body) = table_body() {
        let has_rows = !query_selector_all(Some(&body), "tr").unwrap_or_default().is_empty();
        if !has_rows {
            spawn_local(async move {
                let rows = vm.load_rows().await;
                if let Err(e) = render_rows(&body, &rows) {
                    log::error!("❌ [FEEDBACK] render failed: {:?}", e);
                }
            });
        }
    }
    Ok(())
}
