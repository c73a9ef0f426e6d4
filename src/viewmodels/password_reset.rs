// ============================================================================
// PASSWORD RESET VIEWMODELS - Forgot password and reset with authenticator
// ============================================================================
// The forgot page hands the email to the reset page through session storage.
// The reset page refuses to open without it.
// ============================================================================

use crate::models::auth::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::services::auth_service::AuthService;
use crate::state::session::SessionState;
use crate::state::storage::StorageKey;
use crate::utils::constants::{
    FORGOT_PASSWORD_PAGE, FORM_REDIRECT_DELAY_MS, LOGIN_PAGE, RESET_PASSWORD_PAGE,
};
use crate::utils::query::with_message;
use crate::utils::validation::{is_valid_otp, validate_form, FieldInput, ValidationError};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::{FormOutcome, PageEntry};
use crate::viewmodels::message::MessageKind;

const FORGOT_SENT_MESSAGE: &str = "Please use your authenticator app to reset your password.";
const USER_NOT_FOUND_MESSAGE: &str =
    "No account was found for this email. Please check the address and try again.";
const TWO_FACTOR_DISABLED_MESSAGE: &str =
    "Two-factor authentication isn't enabled for this account. Enable 2FA in Security Settings, then try again.";
const FORGOT_FAILED_MESSAGE: &str = "We couldn't continue with 2FA for this email.";

const RESET_DONE_MESSAGE: &str = "Password has been reset successfully.";
const RESET_FAILED_MESSAGE: &str = "Failed to reset password. Please try again.";
pub const RESET_LOGIN_MESSAGE: &str = "Your password has been reset successfully.";
pub const OTP_FORMAT_MESSAGE: &str = "Authentication code must be 6 digits";

/// Turns a backend refusal into a hint the user can act on.
fn forgot_failure(raw: &str) -> FormOutcome {
    let lower = raw.to_lowercase();
    if lower.contains("user not found") {
        FormOutcome::warning(USER_NOT_FOUND_MESSAGE).focus("email")
    } else if lower.contains("two-factor authentication is not enabled") {
        FormOutcome::warning(TWO_FACTOR_DISABLED_MESSAGE)
    } else {
        FormOutcome::error(FORGOT_FAILED_MESSAGE)
    }
}

// ============================================================================
// FORGOT PASSWORD
// ============================================================================

pub struct ForgotPasswordViewModel {
    auth: AuthService,
    session: SessionState,
    min_password_length: usize,
}

impl ForgotPasswordViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            session: ctx.session.clone(),
            min_password_length: ctx.config.min_password_length,
        }
    }

    pub async fn submit(&self, email: &str) -> FormOutcome {
        let email = email.trim();
        if let Err(errors) =
            validate_form(&[FieldInput::email("email", email)], self.min_password_length)
        {
            return errors.into();
        }

        let envelope = self
            .auth
            .forgot_password(&ForgotPasswordRequest {
                email: email.to_string(),
            })
            .await;

        if envelope.data.success() {
            log::info!("✅ [RESET] reset started for {}", email);
            self.session.storage().set(StorageKey::ResetEmail, email);
            FormOutcome::success(envelope.message_or(FORGOT_SENT_MESSAGE))
                .redirect_to(RESET_PASSWORD_PAGE, FORM_REDIRECT_DELAY_MS)
        } else {
            log::warn!("⚠️ [RESET] forgot-password refused ({})", envelope.status);
            forgot_failure(envelope.data.message().unwrap_or_default())
        }
    }
}

// ============================================================================
// RESET PASSWORD
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub struct ResetPasswordViewModel {
    auth: AuthService,
    session: SessionState,
    min_password_length: usize,
}

impl ResetPasswordViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            session: ctx.session.clone(),
            min_password_length: ctx.config.min_password_length,
        }
    }

    /// The email carried over from the forgot page, or a bounce back there.
    pub fn entry(&self) -> PageEntry {
        match self.session.reset_email() {
            Some(email) => PageEntry::Ready(email),
            None => PageEntry::Leave(FORGOT_PASSWORD_PAGE.to_string()),
        }
    }

    pub fn validate(&self, form: &ResetForm) -> Result<(), FormOutcome> {
        validate_form(
            &[
                FieldInput::email("email", &form.email),
                FieldInput::text("otp", &form.otp),
                FieldInput::password("newPassword", &form.new_password),
                FieldInput::text("confirmPassword", &form.confirm_password),
            ],
            self.min_password_length,
        )?;
        if !is_valid_otp(form.otp.trim()) {
            return Err(FormOutcome::error(OTP_FORMAT_MESSAGE)
                .focus("otp")
                .mark_invalid("otp"));
        }
        if form.new_password != form.confirm_password {
            return Err(FormOutcome::from(ValidationError::PasswordMismatch)
                .focus("confirmPassword")
                .mark_invalid("confirmPassword"));
        }
        Ok(())
    }

    pub async fn submit(&self, form: &ResetForm) -> FormOutcome {
        if let Err(outcome) = self.validate(form) {
            return outcome;
        }

        let envelope = self
            .auth
            .reset_password(&ResetPasswordRequest {
                email: form.email.trim().to_string(),
                otp: form.otp.trim().to_string(),
                new_password: form.new_password.clone(),
            })
            .await;

        if envelope.data.success() {
            log::info!("✅ [RESET] password reset for {}", form.email.trim());
            self.session.storage().remove(StorageKey::ResetEmail);
            FormOutcome::success(envelope.message_or(RESET_DONE_MESSAGE)).redirect_to(
                with_message(LOGIN_PAGE, RESET_LOGIN_MESSAGE, MessageKind::Success),
                FORM_REDIRECT_DELAY_MS,
            )
        } else {
            FormOutcome::error(envelope.message_or(RESET_FAILED_MESSAGE))
        }
    }
}
