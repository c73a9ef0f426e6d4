// ============================================================================
// PAYMENT SERVICE - Admin payment list, summary and row actions
// ============================================================================

use crate::models::api::ApiEnvelope;
use crate::models::payment::{PaymentRow, PaymentSummary};
use crate::services::error::ServiceError;
use crate::services::gateway::RequestGateway;
use crate::services::transport::HttpMethod;
use crate::utils::constants::ADMIN_PAYMENTS_ENDPOINT;

#[derive(Clone)]
pub struct PaymentService {
    gateway: RequestGateway,
}

impl PaymentService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<PaymentRow>, ServiceError> {
        let envelope = self.gateway.send(ADMIN_PAYMENTS_ENDPOINT, HttpMethod::Get).await;
        decode_ok(&envelope)
    }

    pub async fn summary(&self) -> Result<PaymentSummary, ServiceError> {
        let endpoint = format!("{}/summary", ADMIN_PAYMENTS_ENDPOINT);
        let envelope = self.gateway.send(&endpoint, HttpMethod::Get).await;
        decode_ok(&envelope)
    }

    pub async fn confirm(&self, payment_id: &str) -> Result<String, ServiceError> {
        let endpoint = format!("{}/{}/confirm", ADMIN_PAYMENTS_ENDPOINT, payment_id);
        let envelope = self.gateway.send(&endpoint, HttpMethod::Post).await;
        require_success(&envelope, "Confirm failed")
    }

    pub async fn cancel(&self, payment_id: &str) -> Result<String, ServiceError> {
        let endpoint = format!("{}/{}/cancel", ADMIN_PAYMENTS_ENDPOINT, payment_id);
        let envelope = self.gateway.send(&endpoint, HttpMethod::Post).await;
        require_success(&envelope, "Cancel failed")
    }

    /// An empty 2xx body counts as deleted; only an explicit `success: false` refuses.
    pub async fn delete(&self, payment_id: &str) -> Result<String, ServiceError> {
        let endpoint = format!("{}/{}", ADMIN_PAYMENTS_ENDPOINT, payment_id);
        let envelope = self.gateway.send(&endpoint, HttpMethod::Delete).await;
        let refused = envelope.data.get("success").and_then(|v| v.as_bool()) == Some(false);
        if !envelope.is_ok() || refused {
            return Err(ServiceError::Rejected(envelope.message_or("Delete failed")));
        }
        Ok(envelope.message_or("Payment deleted"))
    }

    /// Download is a plain navigation, so the browser handles the file.
    pub fn export_url(&self) -> String {
        format!("{}/export", ADMIN_PAYMENTS_ENDPOINT)
    }
}

fn decode_ok<T: serde::de::DeserializeOwned>(envelope: &ApiEnvelope) -> Result<T, ServiceError> {
    if !envelope.is_ok() {
        return Err(ServiceError::http(envelope));
    }
    envelope
        .data
        .decode()
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

fn require_success(envelope: &ApiEnvelope, fallback: &str) -> Result<String, ServiceError> {
    if envelope.is_ok() && envelope.data.success() {
        Ok(envelope.message_or(fallback))
    } else {
        Err(ServiceError::Rejected(envelope.message_or(fallback)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;
    use serde_json::json;

    #[tokio::test]
    async fn confirm_requires_success_flag() {
        let h = Harness::new();
        h.transport.respond(
            "/api/admin/payments/7/confirm",
            400,
            json!({ "success": false, "message": "Only pending cash payments can be confirmed" }),
        );
        let err = PaymentService::new(h.gateway.clone()).confirm("7").await.unwrap_err();
        assert_eq!(err.user_message(), "Only pending cash payments can be confirmed");
    }

    #[tokio::test]
    async fn cancel_posts_to_row_endpoint() {
        let h = Harness::new();
        h.transport.respond(
            "/api/admin/payments/7/cancel",
            200,
            json!({ "success": true, "message": "Payment cancelled and resources released" }),
        );
        let message = PaymentService::new(h.gateway.clone()).cancel("7").await.unwrap();
        assert_eq!(message, "Payment cancelled and resources released");
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let h = Harness::new();
        h.transport.respond_raw("/api/admin/payments/7", 200, "OK", "");
        assert!(PaymentService::new(h.gateway.clone()).delete("7").await.is_ok());
        assert_eq!(h.transport.last_request().unwrap().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn delete_refused_by_backend() {
        let h = Harness::new();
        h.transport.respond(
            "/api/admin/payments/7",
            200,
            json!({ "success": false, "message": "Payment not found" }),
        );
        let err = PaymentService::new(h.gateway.clone()).delete("7").await.unwrap_err();
        assert_eq!(err, ServiceError::Rejected("Payment not found".into()));
    }

    #[tokio::test]
    async fn summary_decodes() {
        let h = Harness::new();
        h.transport.respond(
            "/api/admin/payments/summary",
            200,
            json!({ "totalRevenue": 10.5, "totalPayments": 2 }),
        );
        let summary = PaymentService::new(h.gateway.clone()).summary().await.unwrap();
        assert_eq!(summary.total_payments, 2);
    }
}
