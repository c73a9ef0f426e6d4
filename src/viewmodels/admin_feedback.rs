// ============================================================================
// ADMIN FEEDBACK VIEWMODEL - Feedback table and reply forms
// ============================================================================

use crate::models::feedback::FeedbackRow;
use crate::services::feedback_service::FeedbackService;
use crate::utils::format::{escape_html, format_date_time};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::FormOutcome;

pub const EMPTY_TABLE_MESSAGE: &str = "No Feedback Available";
pub const REPLY_FAILED_MESSAGE: &str = "Error submitting reply";
const DELETE_FAILED_MESSAGE: &str = "Error deleting feedback";
const PAGE_SIZE: u32 = 50;

/// `★★★☆☆` for a 1-5 rating; out-of-range values are clamped.
pub fn rating_stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRowView {
    pub id: i64,
    pub stars: String,
    pub feedback: String,
    pub author: String,
    pub created_at: String,
    pub resolved: bool,
    pub reply: Option<String>,
    /// "by <name> on <date>" when a reply exists.
    pub replied: Option<String>,
    pub reply_action: String,
}

impl FeedbackRowView {
    pub fn new(row: &FeedbackRow) -> Self {
        let reply = row.has_reply().then(|| row.reply.clone().unwrap_or_default());
        let replied = reply.as_ref().map(|_| {
            format!(
                "by {} on {}",
                row.replied_by_name.as_deref().unwrap_or("Admin"),
                format_date_time(row.replied_at.as_deref())
            )
        });
        Self {
            id: row.id,
            stars: rating_stars(row.rating),
            feedback: row.feedback.clone().unwrap_or_default(),
            author: row
                .created_by_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            created_at: format_date_time(row.created_at.as_deref()),
            resolved: row.is_resolved,
            reply,
            replied,
            reply_action: FeedbackService::reply_action(row.id),
        }
    }

    pub fn status_html(&self) -> &'static str {
        if self.resolved {
            "<span class=\"badge success\">Resolved</span>"
        } else {
            "<span class=\"badge pending\">Open</span>"
        }
    }

    /// Existing reply, or an inline reply form posting to the reply action.
    pub fn reply_html(&self) -> String {
        match (&self.reply, &self.replied) {
            (Some(reply), Some(replied)) => format!(
                "<div class=\"feedback-reply\">{}</div><small>{}</small>",
                escape_html(reply),
                escape_html(replied)
            ),
            _ => format!(
                "<form class=\"feedback-reply-form\" action=\"{}\" method=\"post\">\
                 <textarea name=\"reply\" class=\"form-control\" required></textarea>\
                 <button type=\"submit\" class=\"btn btn-sm btn-primary\">Reply</button></form>",
                escape_html(&self.reply_action)
            ),
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.stars.clone(),
            escape_html(&self.feedback),
            escape_html(&self.author),
            escape_html(&self.created_at),
            self.status_html().to_string(),
            self.reply_html(),
        ]
    }
}

pub struct AdminFeedbackViewModel {
    feedback: FeedbackService,
}

impl AdminFeedbackViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            feedback: FeedbackService::new(ctx.gateway.clone()),
        }
    }

    /// Rows for a table the server rendered empty.
    pub async fn load_rows(&self) -> Vec<FeedbackRowView> {
        match self.feedback.list(0, PAGE_SIZE).await {
            Ok(rows) => rows.iter().map(FeedbackRowView::new).collect(),
            Err(e) => {
                log::error!("❌ [FEEDBACK] load failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Posts a reply form; the page reloads on success.
    pub async fn submit_reply(&self, action: &str, fields: &[(String, String)]) -> FormOutcome {
        match self.feedback.submit_reply(action, fields).await {
            Ok(()) => FormOutcome::success("Reply saved").reload_after(0),
            Err(e) => {
                log::error!("❌ [FEEDBACK] reply failed: {}", e);
                FormOutcome::error(REPLY_FAILED_MESSAGE)
            }
        }
    }

    pub async fn delete(&self, feedback_id: i64) -> FormOutcome {
        match self.feedback.delete(feedback_id).await {
            Ok(()) => FormOutcome::success("Feedback deleted").reload_after(0),
            Err(e) => {
                log::error!("❌ [FEEDBACK] delete failed: {}", e);
                FormOutcome::error(DELETE_FAILED_MESSAGE)
            }
        }
    }
}
