// ============================================================================
// SERVICES - Backend communication only
// ============================================================================

pub mod transport;
pub mod gateway;
pub mod error;
pub mod auth_service;
pub mod profile_service;
pub mod vehicle_service;
pub mod payment_service;
pub mod feedback_service;

#[cfg(target_arch = "wasm32")]
pub mod fetch;

#[cfg(test)]
pub mod testing;

pub use gateway::RequestGateway;
pub use error::ServiceError;
pub use auth_service::AuthService;
pub use profile_service::ProfileService;
pub use vehicle_service::VehicleService;
pub use payment_service::PaymentService;
pub use feedback_service::FeedbackService;
