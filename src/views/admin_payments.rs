// ============================================================================
// ADMIN PAYMENTS VIEW - Summary cards, table and row action buttons
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, closest_target, get_attribute, get_element_by_id, navigate, on_click,
    query_selector, set_inner_html, set_text_content, window, ElementBuilder,
};
use crate::utils::format::escape_html;
use crate::viewmodels::admin_payments::{
    ActionResult, AdminPaymentsViewModel, PaymentAction, PaymentRowView, RowChange, SummaryView,
    DELETE_CONFIRM_PROMPT,
};
use crate::viewmodels::context::PageContext;

pub const TABLE_ID: &str = "paymentsTable";

// ============================================================================
// SUMMARY
// ============================================================================

fn set_text(id: &str, text: &str) {
    if let Some(element) = get_element_by_id(id) {
        set_text_content(&element, text);
    }
}

fn breakdown_html(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(label, value)| {
            format!(
                "<div class=\"method-item\"><span>{}</span><strong>{}</strong></div>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect()
}

fn render_summary(summary: &SummaryView) {
    set_text("totalRevenue", &summary.total_revenue);
    set_text("totalPayments", &summary.total_payments);
    set_text("lastPayment", &summary.last_payment);
    if let Some(by_status) = get_element_by_id("byStatus") {
        set_inner_html(&by_status, &breakdown_html(&summary.by_status));
    }
    if let Some(by_method) = get_element_by_id("byMethod") {
        set_inner_html(&by_method, &breakdown_html(&summary.by_method));
    }
}

// ============================================================================
// TABLE
// ============================================================================

fn table_body() -> Option<Element> {
    query_selector(&format!("#{} tbody", TABLE_ID)).ok().flatten()
}

fn row_element(row: &PaymentRowView) -> Result<Element, JsValue> {
    let mut builder = ElementBuilder::new("tr")?.attr("data-payment-id", &row.payment_id)?;
    for cell in row.cells() {
        builder = builder.child(ElementBuilder::new("td")?.html(&cell).build())?;
    }
    Ok(builder.build())
}

fn render_rows(rows: &[PaymentRowView]) -> Result<(), JsValue> {
    let Some(body) = table_body() else {
        return Ok(());
    };
    set_inner_html(&body, "");
    for row in rows {
        append_child(&body, &row_element(row)?)?;
    }
    Ok(())
}

fn find_row(payment_id: &str) -> Option<Element> {
    let body = table_body()?;
    body.query_selector(&format!("tr[data-payment-id=\"{}\"]", payment_id))
        .ok()
        .flatten()
}

fn apply_change(result: &ActionResult) -> Result<(), JsValue> {
    match &result.change {
        RowChange::Updated(row) => {
            if let Some(existing) = find_row(&row.payment_id) {
                existing.replace_with_with_node_1(&row_element(row)?)?;
            }
        }
        RowChange::Removed(payment_id) => {
            if let Some(existing) = find_row(payment_id) {
                existing.remove();
            }
        }
    }
    if let Some(summary) = &result.summary {
        render_summary(summary);
    }
    Ok(())
}

async fn refresh(vm: Rc<AdminPaymentsViewModel>) {
    if let Some(summary) = vm.load_summary().await {
        render_summary(&summary);
    }
    let rows = vm.load_rows().await;
    if let Err(e) = render_rows(&rows) {
        log::error!("❌ [PAYMENTS] table render failed: {:?}", e);
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

fn action_of(button: &Element) -> Option<PaymentAction> {
    let classes = button.class_list();
    (0..classes.length())
        .filter_map(|i| classes.item(i))
        .find_map(|class| PaymentAction::from_js_class(&class))
}

fn confirmed(action: PaymentAction) -> bool {
    if action != PaymentAction::Delete {
        return true;
    }
    window()
        .and_then(|w| w.confirm_with_message(DELETE_CONFIRM_PROMPT).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

fn bind_table(table: &Element, vm: Rc<AdminPaymentsViewModel>) -> Result<(), JsValue> {
    on_click(table, move |event| {
        let Some(button) = closest_target(&event, "button[data-id]") else {
            return;
        };
        let Some(action) = action_of(&button) else {
            return;
        };
        let Some(payment_id) = get_attribute(&button, "data-id") else {
            return;
        };
        if !confirmed(action) {
            return;
        }

        log::info!("💳 [PAYMENTS] {:?} payment {}", action, payment_id);
        let vm = vm.clone();
        spawn_local(async move {
            match vm.perform(action, &payment_id).await {
                Ok(result) => {
                    if let Err(e) = apply_change(&result) {
                        log::error!("❌ [PAYMENTS] row update failed: {:?}", e);
                    }
                }
                Err(message) => alert(&message),
            }
        });
    })
}

pub fn mount(ctx: &PageContext) -> Result<(), JsValue> {
    let Some(table) = get_element_by_id(TABLE_ID) else {
        return Ok(());
    };
    log::info!("📋 [PAYMENTS] dashboard attached");

    let vm = Rc::new(AdminPaymentsViewModel::new(ctx));
    bind_table(&table, vm.clone())?;

    if let Some(refresh_btn) = get_element_by_id("refreshBtn") {
        let vm = vm.clone();
        on_click(&refresh_btn, move |_| spawn_local(refresh(vm.clone())))?;
    }
    if let Some(export_btn) = get_element_by_id("exportBtn") {
        let url = vm.export_url();
        on_click(&export_btn, move |_| navigate(&url))?;
    }
    if let Some(print_btn) = get_element_by_id("printBtn") {
        on_click(&print_btn, |_| {
            if let Some(w) = window() {
                let _ = w.print();
            }
        })?;
    }

    spawn_local(refresh(vm));
    Ok(())
}
