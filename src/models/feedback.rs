use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRow {
    pub id: i64,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, alias = "resolved")]
    pub is_resolved: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub replied_at: Option<String>,
    #[serde(default)]
    pub replied_by_name: Option<String>,
}

impl FeedbackRow {
    pub fn has_reply(&self) -> bool {
        self.reply.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}
