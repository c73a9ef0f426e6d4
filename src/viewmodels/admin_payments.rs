// ============================================================================
// ADMIN PAYMENTS VIEWMODEL - Summary cards, payment table and row actions
// ============================================================================
// Rows are kept here so a confirm/cancel/delete updates one row in place
// instead of reloading the whole table.
// ============================================================================

use std::cell::RefCell;

use crate::models::payment::{PaymentRow, PaymentSummary};
use crate::services::payment_service::PaymentService;
use crate::utils::format::{escape_html, format_currency, format_date_time};
use crate::viewmodels::context::PageContext;

pub const DELETE_CONFIRM_PROMPT: &str = "Delete this payment permanently? This cannot be undone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Pending,
    Cancelled,
    Failed,
    Completed,
}

impl StatusBadge {
    pub fn from_status(status: Option<&str>) -> Self {
        let status = status.unwrap_or_default().to_lowercase();
        if status.contains("pend") {
            StatusBadge::Pending
        } else if status.contains("cancel") {
            StatusBadge::Cancelled
        } else if status.contains("fail") || status.contains("declin") {
            StatusBadge::Failed
        } else {
            StatusBadge::Completed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Pending => "Pending",
            StatusBadge::Cancelled => "Cancelled",
            StatusBadge::Failed => "Failed",
            StatusBadge::Completed => "Completed",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBadge::Pending => "pending",
            StatusBadge::Cancelled | StatusBadge::Failed => "failed",
            StatusBadge::Completed => "success",
        }
    }

    pub fn html(&self) -> String {
        format!("<span class=\"badge {}\">{}</span>", self.css_class(), self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    Confirm,
    Cancel,
    Delete,
}

impl PaymentAction {
    /// Marker class the click handler looks for.
    pub fn js_class(&self) -> &'static str {
        match self {
            PaymentAction::Confirm => "js-confirm",
            PaymentAction::Cancel => "js-cancel",
            PaymentAction::Delete => "js-delete",
        }
    }

    pub fn from_js_class(class: &str) -> Option<Self> {
        [PaymentAction::Confirm, PaymentAction::Cancel, PaymentAction::Delete]
            .into_iter()
            .find(|a| a.js_class() == class)
    }

    fn button_html(&self, payment_id: &str) -> String {
        let (style, icon, label) = match self {
            PaymentAction::Confirm => ("btn-success", "fa-check", "Confirm"),
            PaymentAction::Cancel => ("btn-danger", "fa-times", "Cancel"),
            PaymentAction::Delete => ("btn-outline-danger", "fa-trash", "Delete"),
        };
        format!(
            "<button class=\"btn btn-sm {} {}\" data-id=\"{}\"><i class=\"fa {}\"></i> {}</button>",
            style,
            self.js_class(),
            escape_html(payment_id),
            icon,
            label
        )
    }
}

/// Confirm only for pending cash, Cancel for card or cash, Delete always.
pub fn actions_for(method: Option<&str>, status: Option<&str>) -> Vec<PaymentAction> {
    let method = method.unwrap_or_default().to_lowercase();
    let status = status.unwrap_or_default().to_lowercase();
    let mut actions = Vec::with_capacity(3);
    if method == "cash" && status.contains("pend") {
        actions.push(PaymentAction::Confirm);
    }
    if method == "card" || method == "cash" {
        actions.push(PaymentAction::Cancel);
    }
    actions.push(PaymentAction::Delete);
    actions
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRowView {
    pub payment_id: String,
    pub date: String,
    pub booking: String,
    pub customer: String,
    pub email: String,
    pub method: String,
    pub amount: String,
    pub badge: StatusBadge,
    pub actions: Vec<PaymentAction>,
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

impl PaymentRowView {
    pub fn new(row: &PaymentRow, currency_symbol: &str) -> Self {
        Self {
            payment_id: row.payment_id.clone().unwrap_or_default(),
            date: format_date_time(row.payment_date.as_deref()),
            booking: format!("#{}", row.booking_id.as_deref().unwrap_or("-")),
            customer: or_dash(row.customer_name.as_deref()),
            email: or_dash(row.customer_email.as_deref()),
            method: or_dash(row.payment_method.as_deref()),
            amount: format_currency(row.amount, currency_symbol),
            badge: StatusBadge::from_status(row.payment_status.as_deref()),
            actions: actions_for(row.payment_method.as_deref(), row.payment_status.as_deref()),
        }
    }

    /// Cell markup in table column order.
    pub fn cells(&self) -> Vec<String> {
        let actions = self
            .actions
            .iter()
            .map(|a| a.button_html(&self.payment_id))
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            escape_html(&self.payment_id),
            escape_html(&self.date),
            escape_html(&self.booking),
            escape_html(&self.customer),
            escape_html(&self.email),
            escape_html(&self.method),
            escape_html(&self.amount),
            self.badge.html(),
            actions,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub total_revenue: String,
    pub total_payments: String,
    pub last_payment: String,
    /// `(status, count)`
    pub by_status: Vec<(String, String)>,
    /// `(method, "amount (count)")`
    pub by_method: Vec<(String, String)>,
}

impl SummaryView {
    pub fn new(summary: &PaymentSummary, currency_symbol: &str) -> Self {
        Self {
            total_revenue: format_currency(Some(summary.total_revenue.unwrap_or(0.0)), currency_symbol),
            total_payments: summary.total_payments.to_string(),
            last_payment: format_date_time(summary.last_payment_date.as_deref()),
            by_status: summary
                .by_status
                .iter()
                .map(|s| (s.status.clone(), s.count.to_string()))
                .collect(),
            by_method: summary
                .by_method
                .iter()
                .map(|m| {
                    (
                        m.method.clone(),
                        format!("{} ({})", format_currency(m.amount, currency_symbol), m.count),
                    )
                })
                .collect(),
        }
    }
}

/// How the table changes after a successful row action.
#[derive(Debug, Clone, PartialEq)]
pub enum RowChange {
    Updated(PaymentRowView),
    Removed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub change: RowChange,
    /// Fresh totals; `None` when the summary reload failed.
    pub summary: Option<SummaryView>,
}

pub struct AdminPaymentsViewModel {
    payments: PaymentService,
    currency_symbol: String,
    rows: RefCell<Vec<PaymentRowView>>,
}

impl AdminPaymentsViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            payments: PaymentService::new(ctx.gateway.clone()),
            currency_symbol: ctx.config.currency_symbol.clone(),
            rows: RefCell::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<PaymentRowView> {
        self.rows.borrow().clone()
    }

    pub async fn load_summary(&self) -> Option<SummaryView> {
        match self.payments.summary().await {
            Ok(summary) => Some(SummaryView::new(&summary, &self.currency_symbol)),
            Err(e) => {
                log::error!("❌ [PAYMENTS] summary load error: {}", e);
                None
            }
        }
    }

    /// Replaces the table contents. On failure the previous rows stay.
    pub async fn load_rows(&self) -> Vec<PaymentRowView> {
        match self.payments.list().await {
            Ok(rows) => {
                let views: Vec<PaymentRowView> = rows
                    .iter()
                    .map(|r| PaymentRowView::new(r, &self.currency_symbol))
                    .collect();
                log::info!("📦 [PAYMENTS] {} rows loaded", views.len());
                *self.rows.borrow_mut() = views;
            }
            Err(e) => log::error!("❌ [PAYMENTS] payments load error: {}", e),
        }
        self.rows()
    }

    /// Runs a row action. The error is the message for the alert box.
    /// Delete must already have been confirmed by the user.
    pub async fn perform(&self, action: PaymentAction, payment_id: &str) -> Result<ActionResult, String> {
        let result = match action {
            PaymentAction::Confirm => self.payments.confirm(payment_id).await,
            PaymentAction::Cancel => self.payments.cancel(payment_id).await,
            PaymentAction::Delete => self.payments.delete(payment_id).await,
        };
        if let Err(e) = result {
            log::error!("❌ [PAYMENTS] {:?} on {} failed: {}", action, payment_id, e);
            return Err(e.user_message());
        }

        let change = self.apply(action, payment_id);
        let summary = self.load_summary().await;
        Ok(ActionResult { change, summary })
    }

    fn apply(&self, action: PaymentAction, payment_id: &str) -> RowChange {
        let mut rows = self.rows.borrow_mut();
        let (badge, actions) = match action {
            PaymentAction::Delete => {
                rows.retain(|r| r.payment_id != payment_id);
                return RowChange::Removed(payment_id.to_string());
            }
            PaymentAction::Confirm => (
                StatusBadge::Completed,
                vec![PaymentAction::Cancel, PaymentAction::Delete],
            ),
            PaymentAction::Cancel => (StatusBadge::Cancelled, vec![PaymentAction::Delete]),
        };

        match rows.iter_mut().find(|r| r.payment_id == payment_id) {
            Some(row) => {
                row.badge = badge;
                row.actions = actions;
                RowChange::Updated(row.clone())
            }
            // Row not on screen; nothing to patch, so drop it from the view.
            None => RowChange::Removed(payment_id.to_string()),
        }
    }

    pub fn export_url(&self) -> String {
        self.payments.export_url()
    }
}
