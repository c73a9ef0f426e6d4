// ============================================================================
// LOGIN VIEWMODEL
// ============================================================================
// Validates credentials, calls the login endpoint and routes the user:
// to the 2FA check, to a landing page, or back to the form with an error.
// ============================================================================

use crate::config::RedirectPolicy;
use crate::models::auth::{AuthOutcome, LoginRequest};
use crate::services::auth_service::{decode_auth_response, AuthService};
use crate::state::session::SessionState;
use crate::state::storage::StorageKey;
use crate::utils::constants::{
    ADMIN_DASHBOARD_PAGE, DASHBOARD_PAGE, FLEET_MANAGER_DASHBOARD_PAGE, LOGIN_REDIRECT_DELAY_MS,
    VERIFY_2FA_PAGE,
};
use crate::utils::query::QueryParams;
use crate::utils::validation::is_valid_email;
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::FormOutcome;

pub const TWO_FACTOR_REQUIRED_MESSAGE: &str = "Two-factor authentication required. Redirecting...";
const MISSING_TOKEN_MESSAGE: &str =
    "Authentication successful but no token received. Please try again.";
const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Landing page after authentication.
pub fn landing_page(role: Option<&str>, policy: RedirectPolicy) -> &'static str {
    if policy == RedirectPolicy::Dashboard {
        return DASHBOARD_PAGE;
    }
    match role {
        Some(role) if role.contains("FLEET_MANAGER") => FLEET_MANAGER_DASHBOARD_PAGE,
        Some(role) if role.contains("ADMIN") || role.contains("OWNER") => ADMIN_DASHBOARD_PAGE,
        _ => DASHBOARD_PAGE,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub struct LoginViewModel {
    auth: AuthService,
    session: SessionState,
    policy: RedirectPolicy,
    min_password_length: usize,
}

impl LoginViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            session: ctx.session.clone(),
            policy: ctx.config.redirect_policy,
            min_password_length: ctx.config.min_password_length,
        }
    }

    /// First problem with the credentials, with the field to focus.
    pub fn validate(&self, form: &LoginForm) -> Result<(), FormOutcome> {
        let email = form.email.trim();
        if email.is_empty() {
            return Err(FormOutcome::error("Email address is required.")
                .focus("email")
                .mark_invalid("email"));
        }
        if !is_valid_email(email) {
            return Err(FormOutcome::error("Please enter a valid email address.")
                .focus("email")
                .mark_invalid("email"));
        }
        if form.password.is_empty() {
            return Err(FormOutcome::error("Password is required.")
                .focus("password")
                .mark_invalid("password"));
        }
        if form.password.chars().count() < self.min_password_length {
            return Err(FormOutcome::error(format!(
                "Password must be at least {} characters long.",
                self.min_password_length
            ))
            .focus("password")
            .mark_invalid("password"));
        }
        Ok(())
    }

    pub async fn submit(&self, form: &LoginForm, query: &QueryParams) -> FormOutcome {
        if let Err(outcome) = self.validate(form) {
            return outcome;
        }

        let email = form.email.trim().to_string();
        self.session.set_user_email(&email);

        let envelope = self
            .auth
            .login(&LoginRequest {
                email: email.clone(),
                password: form.password.clone(),
            })
            .await;
        let response = decode_auth_response(&envelope);

        match response.outcome() {
            AuthOutcome::RequiresTwoFactor => {
                log::info!("🔐 [LOGIN] 2FA required for {}", email);
                self.session.storage().set(StorageKey::AuthEmail, &email);
                FormOutcome::info(TWO_FACTOR_REQUIRED_MESSAGE)
                    .redirect_to(VERIFY_2FA_PAGE, LOGIN_REDIRECT_DELAY_MS)
            }
            AuthOutcome::Authenticated(identity) => {
                self.session.store_identity(&identity, Some(&email));
                let target = match (response.redirect.as_deref(), query.return_url()) {
                    (Some(redirect), _) if !redirect.is_empty() => redirect.to_string(),
                    (_, Some(return_url)) => return_url.to_string(),
                    _ => landing_page(identity.role.as_deref(), self.policy).to_string(),
                };
                log::info!("✅ [LOGIN] authenticated, redirecting to {}", target);
                let message = response.message.as_deref().unwrap_or("Login successful!");
                FormOutcome::success(message).redirect_to(target, LOGIN_REDIRECT_DELAY_MS)
            }
            AuthOutcome::MissingToken => {
                log::warn!("⚠️ [LOGIN] success without token");
                FormOutcome::error(MISSING_TOKEN_MESSAGE)
            }
            AuthOutcome::Failed(message) => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
                let outcome = FormOutcome::error(message.clone());
                if message.contains("email") || message.contains("account") {
                    outcome.focus("email")
                } else if message.contains("password") {
                    outcome.focus("password")
                } else {
                    outcome
                }
            }
        }
    }
}
