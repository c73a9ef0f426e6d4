// ============================================================================
// REGISTER VIEWMODEL
// ============================================================================

use crate::models::auth::RegisterRequest;
use crate::services::auth_service::AuthService;
use crate::utils::constants::{CUSTOMER_ROLE, FORM_REDIRECT_DELAY_MS, LOGIN_PAGE};
use crate::utils::validation::{validate_form, FieldInput, FieldKind, ValidationError};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::FormOutcome;

const REGISTERED_MESSAGE: &str = "Registration successful! You can now login.";
const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role_name: String,
    pub registration_code: String,
}

impl RegisterForm {
    fn fields(&self) -> Vec<FieldInput> {
        vec![
            FieldInput::text("firstName", &self.first_name),
            FieldInput::text("lastName", &self.last_name),
            FieldInput::email("email", &self.email),
            FieldInput::password("password", &self.password),
            FieldInput::new("passwordConfirm", &self.password_confirm, FieldKind::Text, true),
        ]
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role_name: self.role_name.clone(),
            registration_code: needs_registration_code(&self.role_name)
                .then(|| self.registration_code.clone()),
        }
    }
}

/// Staff roles must present a registration code; customers never do.
pub fn needs_registration_code(role: &str) -> bool {
    role != CUSTOMER_ROLE
}

pub struct RegisterViewModel {
    auth: AuthService,
    min_password_length: usize,
}

impl RegisterViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            min_password_length: ctx.config.min_password_length,
        }
    }

    pub fn validate(&self, form: &RegisterForm) -> Result<(), FormOutcome> {
        validate_form(&form.fields(), self.min_password_length)?;
        if form.password != form.password_confirm {
            return Err(
                FormOutcome::from(ValidationError::PasswordMismatch).mark_invalid("passwordConfirm")
            );
        }
        Ok(())
    }

    pub async fn submit(&self, form: &RegisterForm) -> FormOutcome {
        if let Err(outcome) = self.validate(form) {
            return outcome;
        }

        let envelope = self.auth.register(&form.to_request()).await;
        if envelope.data.success() {
            log::info!("✅ [REGISTER] account created for {}", form.email.trim());
            FormOutcome::success(envelope.message_or(REGISTERED_MESSAGE))
                .reset()
                .redirect_to(LOGIN_PAGE, FORM_REDIRECT_DELAY_MS)
        } else {
            log::warn!("⚠️ [REGISTER] rejected with status {}", envelope.status);
            FormOutcome::error(envelope.message_or(REGISTER_FAILED_MESSAGE))
        }
    }
}
