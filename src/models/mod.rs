pub mod api;
pub mod auth;
pub mod profile;
pub mod vehicle;
pub mod payment;
pub mod feedback;

pub use api::{ApiData, ApiEnvelope};
pub use auth::{AuthOutcome, AuthResponse, AuthStatus, Identity};
pub use vehicle::Vehicle;
pub use payment::{PaymentRow, PaymentSummary};
pub use feedback::FeedbackRow;
