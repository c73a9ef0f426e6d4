// ============================================================================
// VIEWS - DOM side of each page; all decisions live in the viewmodels
// ============================================================================

pub mod message;
pub mod button;
pub mod form;
pub mod login;
pub mod register;
pub mod password_reset;
pub mod two_factor;
pub mod profile;
pub mod vehicles;
pub mod admin_payments;
pub mod admin_feedback;
pub mod feedback_form;
pub mod package_booking;

pub use form::{apply_outcome, bind_submit, MessageTarget};
pub use message::{clear_message, show_message};
