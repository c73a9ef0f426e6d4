use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Parsed response body. Always a JSON value, never absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiData(Value);

impl ApiData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Body used when the response had no usable JSON.
    pub fn fallback(ok: bool, status_text: &str) -> Self {
        Self(json!({ "success": ok, "message": status_text }))
    }

    /// Body synthesized for a request that never produced a response.
    pub fn error(message: &str) -> Self {
        Self(json!({ "success": false, "message": message }))
    }

    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Backend message, when present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.str("message")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

/// What every gateway call resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    pub status: u16,
    pub data: ApiData,
}

impl ApiEnvelope {
    pub fn new(status: u16, data: ApiData) -> Self {
        Self { status, data }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Backend message, or `fallback` when the body carries none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.data.message().unwrap_or(fallback).to_string()
    }
}
