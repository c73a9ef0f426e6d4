// ============================================================================
// REQUEST GATEWAY - Every backend call goes through here
// ============================================================================
// Adds JSON headers and the bearer token, races the request against the
// timeout, and turns whatever happened into an ApiEnvelope. Never fails.
// ============================================================================

use std::rc::Rc;

use futures::future::{self, Either};
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::api::{ApiData, ApiEnvelope};
use crate::services::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, Timer, TransportError};
use crate::state::storage::ClientStorage;
use crate::utils::query::encode_form;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const TIMEOUT_MESSAGE: &str =
    "Request timed out. Server might be overloaded. Please try again later.";
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication failed. Please log in again.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";

/// Shared HTTP helper. Cheap to clone.
#[derive(Clone)]
pub struct RequestGateway {
    transport: Rc<dyn HttpTransport>,
    timer: Rc<dyn Timer>,
    storage: ClientStorage,
    base_url: String,
    timeout_ms: u32,
    extra_headers: Vec<(String, String)>,
}

impl RequestGateway {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        timer: Rc<dyn Timer>,
        storage: ClientStorage,
        config: &AppConfig,
    ) -> Self {
        Self {
            transport,
            timer,
            storage,
            base_url: config.backend_url.clone(),
            timeout_ms: config.request_timeout_ms,
            extra_headers: Vec::new(),
        }
    }

    /// Copy that sends `name: value` on every request (e.g. the page's CSRF token).
    pub fn with_header(&self, name: &str, value: &str) -> Self {
        let mut gateway = self.clone();
        gateway.extra_headers.push((name.to_string(), value.to_string()));
        gateway
    }

    pub fn storage(&self) -> &ClientStorage {
        &self.storage
    }

    pub fn timer(&self) -> Rc<dyn Timer> {
        self.timer.clone()
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }

    fn request(&self, endpoint: &str, method: HttpMethod, content_type: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.url(endpoint))
            .with_credentials()
            .header("Content-Type", content_type);
        for (name, value) in &self.extra_headers {
            request = request.header(name, value);
        }
        match self.storage.token() {
            Some(token) => {
                log::debug!("🔍 [API] {} {} (with token)", method.as_str(), endpoint);
                request.header("Authorization", &format!("Bearer {}", token))
            }
            None => {
                log::debug!("🔍 [API] {} {} (no token)", method.as_str(), endpoint);
                request
            }
        }
    }

    /// JSON call. `body` is serialized when present.
    pub async fn call<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&B>,
    ) -> ApiEnvelope {
        let mut request = self.request(endpoint, method, "application/json");
        if let Some(body) = body {
            match serde_json::to_string(body) {
                Ok(json) => request = request.body(json),
                Err(e) => {
                    log::error!("❌ [API] could not serialize body for {}: {}", endpoint, e);
                    return envelope_from_error(&TransportError::Network(e.to_string()));
                }
            }
        }
        self.dispatch(endpoint, request).await
    }

    /// Call without a body.
    pub async fn send(&self, endpoint: &str, method: HttpMethod) -> ApiEnvelope {
        self.call::<Value>(endpoint, method, None).await
    }

    /// URL-encoded POST, as a plain HTML form would submit it.
    pub async fn post_form(&self, endpoint: &str, pairs: &[(String, String)]) -> ApiEnvelope {
        let request = self
            .request(endpoint, HttpMethod::Post, "application/x-www-form-urlencoded")
            .body(encode_form(pairs));
        self.dispatch(endpoint, request).await
    }

    async fn dispatch(&self, endpoint: &str, request: HttpRequest) -> ApiEnvelope {
        let exchange = self.transport.send(request);
        let deadline = self.timer.sleep(self.timeout_ms);

        let result = match future::select(exchange, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _pending)) => {
                log::warn!("⚠️ [API] {} timed out after {} ms", endpoint, self.timeout_ms);
                Err(TransportError::Timeout)
            }
        };

        match result {
            Ok(response) => {
                let envelope = envelope_from_response(&response);
                log::debug!("🔍 [API] {} -> {}", endpoint, envelope.status);
                envelope
            }
            Err(e) => {
                log::error!("❌ [API] {} failed: {}", endpoint, e);
                envelope_from_error(&e)
            }
        }
    }
}

/// Parsed JSON body whatever the status code, so backend messages surface.
fn envelope_from_response(response: &HttpResponse) -> ApiEnvelope {
    let data = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Null) | Err(_) => ApiData::fallback(response.ok(), &response.status_text),
        Ok(value) => ApiData::new(value),
    };
    ApiEnvelope::new(response.status, data)
}

fn envelope_from_error(error: &TransportError) -> ApiEnvelope {
    let (status, message) = match error {
        TransportError::Timeout | TransportError::Aborted => (500, TIMEOUT_MESSAGE),
        TransportError::Network(detail) if detail.contains("status: 401") => (401, UNAUTHORIZED_MESSAGE),
        TransportError::Network(detail) if detail.contains("status: 403") => (403, FORBIDDEN_MESSAGE),
        TransportError::Network(detail) if detail.contains("status: 404") => (404, NOT_FOUND_MESSAGE),
        TransportError::Network(_) => (500, NETWORK_ERROR_MESSAGE),
    };
    ApiEnvelope::new(status, ApiData::error(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{Harness, HangingTransport, InstantTimer};
    use crate::state::storage::StorageKey;
    use serde_json::json;

    #[tokio::test]
    async fn attaches_headers_and_token() {
        let h = Harness::new();
        h.storage.set(StorageKey::Token, "abc");
        h.transport.respond("/api/ping", 200, json!({ "success": true }));

        let env = h.gateway.call("/api/ping", HttpMethod::Post, Some(&json!({ "a": 1 }))).await;

        assert_eq!(env.status, 200);
        assert!(env.data.success());
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.header_value("content-type"), Some("application/json"));
        assert_eq!(sent.header_value("Authorization"), Some("Bearer abc"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"a":1}"#));
        assert!(sent.credentials);
    }

    #[tokio::test]
    async fn no_token_no_authorization_header() {
        let h = Harness::new();
        h.transport.respond("/api/ping", 200, json!({}));
        h.gateway.send("/api/ping", HttpMethod::Get).await;
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.header_value("Authorization"), None);
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn extra_headers_are_sent() {
        let h = Harness::new();
        h.transport.respond("/api/ping", 200, json!({}));
        h.gateway
            .with_header("X-CSRF-TOKEN", "t0k")
            .send("/api/ping", HttpMethod::Post)
            .await;
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.header_value("X-CSRF-TOKEN"), Some("t0k"));
    }

    #[tokio::test]
    async fn non_2xx_bodies_are_surfaced() {
        let h = Harness::new();
        h.transport.respond("/api/x", 400, json!({ "success": false, "message": "Email taken" }));
        let env = h.gateway.send("/api/x", HttpMethod::Post).await;
        assert_eq!(env.status, 400);
        assert_eq!(env.data.message(), Some("Email taken"));
    }

    #[tokio::test]
    async fn unparseable_or_null_body_falls_back_to_status_text() {
        let h = Harness::new();
        h.transport.respond_raw("/api/html", 200, "OK", "<html></html>");
        h.transport.respond_raw("/api/null", 502, "Bad Gateway", "null");

        let env = h.gateway.send("/api/html", HttpMethod::Get).await;
        assert!(env.data.success());
        assert_eq!(env.data.message(), Some("OK"));

        let env = h.gateway.send("/api/null", HttpMethod::Get).await;
        assert_eq!(env.status, 502);
        assert!(!env.data.success());
        assert_eq!(env.data.message(), Some("Bad Gateway"));
    }

    #[tokio::test]
    async fn network_failures_resolve_to_500() {
        let h = Harness::new();
        h.transport.fail("/api/down", TransportError::Network("Failed to fetch".into()));
        let env = h.gateway.send("/api/down", HttpMethod::Get).await;
        assert_eq!(env.status, 500);
        assert!(!env.data.success());
        assert_eq!(env.data.message(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn status_hints_in_errors_are_mapped() {
        let h = Harness::new();
        h.transport.fail("/a", TransportError::Network("HTTP error! status: 401".into()));
        h.transport.fail("/b", TransportError::Network("HTTP error! status: 403".into()));
        h.transport.fail("/c", TransportError::Network("HTTP error! status: 404".into()));

        let a = h.gateway.send("/a", HttpMethod::Get).await;
        let b = h.gateway.send("/b", HttpMethod::Get).await;
        let c = h.gateway.send("/c", HttpMethod::Get).await;
        assert_eq!((a.status, a.data.message()), (401, Some(UNAUTHORIZED_MESSAGE)));
        assert_eq!((b.status, b.data.message()), (403, Some(FORBIDDEN_MESSAGE)));
        assert_eq!((c.status, c.data.message()), (404, Some(NOT_FOUND_MESSAGE)));
    }

    #[tokio::test]
    async fn timeout_resolves_with_timeout_message() {
        let storage = ClientStorage::in_memory();
        let gateway = RequestGateway::new(
            Rc::new(HangingTransport),
            Rc::new(InstantTimer::default()),
            storage,
            &AppConfig::default(),
        );

        let env = gateway.send("/api/slow", HttpMethod::Get).await;

        assert_eq!(env.status, 500);
        assert_eq!(env.data.message(), Some(TIMEOUT_MESSAGE));
    }

    #[tokio::test]
    async fn timeout_uses_configured_duration() {
        let timer = Rc::new(InstantTimer::default());
        let mut config = AppConfig::default();
        config.request_timeout_ms = 2_500;
        let gateway = RequestGateway::new(
            Rc::new(HangingTransport),
            timer.clone(),
            ClientStorage::in_memory(),
            &config,
        );
        gateway.send("/api/slow", HttpMethod::Get).await;
        assert_eq!(timer.requested(), vec![2_500]);
    }

    #[tokio::test]
    async fn post_form_encodes_pairs() {
        let h = Harness::new();
        h.transport.respond_raw("/api/admin/feedback/reply/4", 200, "OK", "<html>");
        let env = h
            .gateway
            .post_form(
                "/api/admin/feedback/reply/4",
                &[("reply".to_string(), "Thanks & bye".to_string())],
            )
            .await;
        assert!(env.is_ok());
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.header_value("Content-Type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(sent.body.as_deref(), Some("reply=Thanks%20%26%20bye"));
        assert!(sent.credentials);
    }

    #[tokio::test]
    async fn unscripted_endpoint_still_resolves() {
        let h = Harness::new();
        let env = h.gateway.send("/nowhere", HttpMethod::Get).await;
        assert_eq!(env.status, 500);
        assert_eq!(env.data.message(), Some(NETWORK_ERROR_MESSAGE));
    }
}
