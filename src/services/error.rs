use thiserror::Error;

use crate::models::api::ApiEnvelope;

/// Failure of a service call whose caller needs typed data back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The backend answered but refused the action (`success: false`).
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn http(envelope: &ApiEnvelope) -> Self {
        ServiceError::Http {
            status: envelope.status,
            message: envelope.message_or("Request failed"),
        }
    }

    /// Text suitable for the user.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Http { message, .. } => message.clone(),
            ServiceError::Rejected(message) => message.clone(),
            ServiceError::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }
}
