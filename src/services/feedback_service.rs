use crate::models::feedback::FeedbackRow;
use crate::services::error::ServiceError;
use crate::services::gateway::RequestGateway;
use crate::services::transport::HttpMethod;
use crate::utils::constants::{
    ADMIN_FEEDBACK_DELETE_ENDPOINT, ADMIN_FEEDBACK_REPLY_ENDPOINT, FEEDBACK_LIST_ENDPOINT,
};

#[derive(Clone)]
pub struct FeedbackService {
    gateway: RequestGateway,
}

impl FeedbackService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: u32, size: u32) -> Result<Vec<FeedbackRow>, ServiceError> {
        let endpoint = format!("{}?page={}&size={}", FEEDBACK_LIST_ENDPOINT, page, size);
        let envelope = self.gateway.send(&endpoint, HttpMethod::Get).await;
        if !envelope.is_ok() {
            return Err(ServiceError::http(&envelope));
        }
        envelope
            .data
            .decode()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    pub fn reply_action(feedback_id: i64) -> String {
        format!("{}/{}", ADMIN_FEEDBACK_REPLY_ENDPOINT, feedback_id)
    }

    /// Posts the reply form as URL-encoded fields. The backend answers with a
    /// redirect, so any 2xx counts as saved.
    pub async fn submit_reply(&self, action: &str, fields: &[(String, String)]) -> Result<(), ServiceError> {
        let envelope = self.gateway.post_form(action, fields).await;
        if envelope.is_ok() {
            log::info!("✅ [FEEDBACK] reply saved via {}", action);
            Ok(())
        } else {
            Err(ServiceError::http(&envelope))
        }
    }

    pub async fn delete(&self, feedback_id: i64) -> Result<(), ServiceError> {
        let endpoint = format!("{}/{}", ADMIN_FEEDBACK_DELETE_ENDPOINT, feedback_id);
        let envelope = self.gateway.post_form(&endpoint, &[]).await;
        if envelope.is_ok() {
            Ok(())
        } else {
            Err(ServiceError::http(&envelope))
        }
    }
}
