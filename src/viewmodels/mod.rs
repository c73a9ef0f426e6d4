pub mod context;
pub mod form;
pub mod message;
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

pub use context::PageContext;
pub use form::{FormOutcome, FormPhase, Navigation, PageEntry, Redirect, SubmitGuard};
pub use message::{MessageKind, MessageSlot, MessageView};
pub use login::LoginViewModel;
pub use register::RegisterViewModel;
pub use password_reset::{ForgotPasswordViewModel, ResetPasswordViewModel};
pub use two_factor::{TwoFactorSetupViewModel, VerifyViewModel};
pub use profile::ProfileViewModel;
pub use vehicles::VehiclesViewModel;
pub use admin_payments::AdminPaymentsViewModel;
pub use admin_feedback::AdminFeedbackViewModel;
pub use feedback_form::{validate_feedback, FeedbackForm, FeedbackRejection};
pub use package_booking::{quote, PackageQuote};
