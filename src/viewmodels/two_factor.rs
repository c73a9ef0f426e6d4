// ============================================================================
// TWO-FACTOR VIEWMODELS - Login verification, setup and enabling
// ============================================================================
// Verify: second step of a login that the backend flagged as 2FA.
// Setup: a logged-in user asks for a QR code, then enables 2FA with a code.
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::RedirectPolicy;
use crate::models::auth::{AuthOutcome, TwoFactorCodeRequest, TwoFactorSetupRequest};
use crate::services::auth_service::{decode_auth_response, decode_setup_response, AuthService};
use crate::state::session::SessionState;
use crate::state::storage::StorageKey;
use crate::utils::constants::{
    DASHBOARD_PAGE, FORM_REDIRECT_DELAY_MS, LOGIN_PAGE, LOGIN_REDIRECT_DELAY_MS,
    SESSION_EXPIRED_DELAY_MS,
};
use crate::utils::query::with_message;
use crate::utils::validation::{is_valid_otp, validate_form, FieldInput};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::{FormOutcome, PageEntry};
use crate::viewmodels::login::landing_page;
use crate::viewmodels::message::MessageKind;

lazy_static! {
    static ref SECRET_RE: Regex = Regex::new(r"secret=([A-Z0-9]+)").expect("secret pattern compiles");
}

pub const CODE_FORMAT_MESSAGE: &str = "Verification code must be 6 digits";
const VERIFIED_MESSAGE: &str = "Verification successful!";
const VERIFY_FAILED_MESSAGE: &str = "Invalid verification code. Please try again.";

const SCAN_MESSAGE: &str = "Scan the QR code with your authenticator app.";
pub const SECRET_UNAVAILABLE: &str = "Secret key not available";
const SETUP_FAILED_MESSAGE: &str = "Failed to set up 2FA. Please try again.";
const SETUP_SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. Please log out and log in again.";
const SETUP_USER_NOT_FOUND_MESSAGE: &str =
    "User account not found. Please check your login credentials.";
const SETUP_SERVER_ERROR_MESSAGE: &str =
    "Server error generating QR code. Please contact support.";
const SETUP_NO_EMAIL_MESSAGE: &str = "User email not found. Please log out and log in again.";

const ENABLED_MESSAGE: &str = "2FA enabled successfully!";
const ENABLE_FAILED_MESSAGE: &str = "Failed to enable 2FA. Please try again.";
const ENABLE_NO_EMAIL_MESSAGE: &str = "Authentication issue. Please try logging in again.";
const ENABLED_DASHBOARD_MESSAGE: &str = "Two-factor authentication has been enabled for your account.";

fn code_outcome(code: &str) -> Result<(), FormOutcome> {
    if is_valid_otp(code) {
        Ok(())
    } else {
        Err(FormOutcome::error(CODE_FORMAT_MESSAGE)
            .focus("code")
            .mark_invalid("code"))
    }
}

// ============================================================================
// VERIFY (login second step)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct VerifyForm {
    pub email: String,
    pub code: String,
}

pub struct VerifyViewModel {
    auth: AuthService,
    session: SessionState,
    policy: RedirectPolicy,
    min_password_length: usize,
}

impl VerifyViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            session: ctx.session.clone(),
            policy: ctx.config.redirect_policy,
            min_password_length: ctx.config.min_password_length,
        }
    }

    /// The email parked by the login page; without it the user starts over.
    pub fn entry(&self) -> PageEntry {
        match self.session.auth_email() {
            Some(email) => PageEntry::Ready(email),
            None => PageEntry::Leave(LOGIN_PAGE.to_string()),
        }
    }

    pub async fn submit(&self, form: &VerifyForm) -> FormOutcome {
        let email = form.email.trim();
        let code = form.code.trim();
        if let Err(errors) = validate_form(
            &[FieldInput::email("email", email), FieldInput::text("code", code)],
            self.min_password_length,
        ) {
            return errors.into();
        }
        if let Err(outcome) = code_outcome(code) {
            return outcome;
        }

        let envelope = self
            .auth
            .verify_two_factor(&TwoFactorCodeRequest {
                email: email.to_string(),
                code: code.to_string(),
            })
            .await;
        let response = decode_auth_response(&envelope);

        match response.verify_outcome() {
            AuthOutcome::Authenticated(identity) => {
                self.session.store_identity(&identity, Some(email));
                self.session.storage().remove(StorageKey::AuthEmail);
                let target = landing_page(identity.role.as_deref(), self.policy);
                log::info!("✅ [2FA] verified, redirecting to {}", target);
                let message = response.message.as_deref().unwrap_or(VERIFIED_MESSAGE);
                FormOutcome::success(message).redirect_to(target, LOGIN_REDIRECT_DELAY_MS)
            }
            AuthOutcome::Failed(message) => FormOutcome::error(
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| VERIFY_FAILED_MESSAGE.to_string()),
            )
            .focus("code"),
            AuthOutcome::MissingToken | AuthOutcome::RequiresTwoFactor => {
                FormOutcome::error(VERIFY_FAILED_MESSAGE)
            }
        }
    }
}

// ============================================================================
// SETUP (security settings)
// ============================================================================

/// `otpauth://` URIs go through the QR image service, bare base64 images get
/// a data-URI prefix and anything else is used as is.
pub fn normalize_qr_source(raw: &str, qr_service_url: &str) -> String {
    if raw.starts_with("otpauth://") {
        format!("{}{}", qr_service_url, urlencoding::encode(raw))
    } else if !raw.starts_with("data:image") && (raw.starts_with("/9j/") || raw.starts_with("iVBOR")) {
        format!("data:image/png;base64,{}", raw)
    } else {
        raw.to_string()
    }
}

pub fn extract_secret(uri: &str) -> Option<String> {
    SECRET_RE
        .captures(uri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// What the setup page shows once the backend produced a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSetup {
    pub image_src: String,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub qr: Option<QrSetup>,
    pub outcome: FormOutcome,
}

impl SetupOutcome {
    fn failed(outcome: FormOutcome) -> Self {
        Self { qr: None, outcome }
    }
}

pub struct TwoFactorSetupViewModel {
    auth: AuthService,
    session: SessionState,
    qr_service_url: String,
}

impl TwoFactorSetupViewModel {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            auth: AuthService::new(ctx.gateway.clone()),
            session: ctx.session.clone(),
            qr_service_url: ctx.config.qr_service_url.clone(),
        }
    }

    /// Only logged-in users may set up 2FA. Ready carries the known email,
    /// possibly empty.
    pub fn entry(&self) -> PageEntry {
        match self.session.is_authenticated() {
            true => PageEntry::Ready(self.session.user_email().unwrap_or_default()),
            false => PageEntry::Leave(with_message(
                LOGIN_PAGE,
                "Please log in to access this page",
                MessageKind::Error,
            )),
        }
    }

    /// Requests a QR code. `page_email` is used (and remembered) when the
    /// session has no email; `timestamp` defeats caching of the response.
    pub async fn request_qr(&self, page_email: Option<&str>, timestamp: i64) -> SetupOutcome {
        let email = match self.session.user_email() {
            Some(email) => email,
            None => match page_email.map(str::trim).filter(|e| !e.is_empty()) {
                Some(email) => {
                    self.session.set_user_email(email);
                    email.to_string()
                }
                None => return SetupOutcome::failed(FormOutcome::error(SETUP_NO_EMAIL_MESSAGE)),
            },
        };
        if !self.session.is_authenticated() {
            return SetupOutcome::failed(FormOutcome::error(
                "Authentication token not found. Please log out and log in again.",
            ));
        }

        let envelope = self
            .auth
            .setup_two_factor(&TwoFactorSetupRequest {
                email: email.clone(),
                timestamp,
            })
            .await;
        log::info!("📥 [2FA] setup responded with {}", envelope.status);

        let setup = decode_setup_response(&envelope);
        match setup.qr_code_uri.filter(|uri| !uri.is_empty()) {
            Some(uri) if envelope.status == 200 => {
                let secret = setup
                    .secret_key
                    .filter(|s| !s.is_empty())
                    .or_else(|| extract_secret(&uri))
                    .unwrap_or_else(|| {
                        log::warn!("⚠️ [2FA] no secret in setup response");
                        SECRET_UNAVAILABLE.to_string()
                    });
                SetupOutcome {
                    qr: Some(QrSetup {
                        image_src: normalize_qr_source(&uri, &self.qr_service_url),
                        secret,
                    }),
                    outcome: FormOutcome::success(SCAN_MESSAGE),
                }
            }
            _ => SetupOutcome::failed(self.setup_failure(envelope.status, envelope.data.message())),
        }
    }

    fn setup_failure(&self, status: u16, message: Option<&str>) -> FormOutcome {
        match status {
            401 => {
                log::warn!("⚠️ [2FA] token rejected during setup, logging out");
                self.session.expire();
                FormOutcome::error(SETUP_SESSION_EXPIRED_MESSAGE).redirect_to(
                    with_message(
                        LOGIN_PAGE,
                        "Session expired. Please log in again.",
                        MessageKind::Error,
                    ),
                    SESSION_EXPIRED_DELAY_MS,
                )
            }
            404 => FormOutcome::error(SETUP_USER_NOT_FOUND_MESSAGE),
            500 => FormOutcome::error(SETUP_SERVER_ERROR_MESSAGE),
            _ => FormOutcome::error(message.unwrap_or(SETUP_FAILED_MESSAGE)),
        }
    }

    /// Confirms the first code from the authenticator and turns 2FA on.
    pub async fn enable(&self, code: &str) -> FormOutcome {
        let code = code.trim();
        if code.is_empty() {
            return FormOutcome::error("Please fill in all required fields correctly")
                .mark_invalid("code");
        }
        let Some(email) = self.session.user_email().or_else(|| self.session.auth_email()) else {
            return FormOutcome::error(ENABLE_NO_EMAIL_MESSAGE);
        };
        if let Err(outcome) = code_outcome(code) {
            return outcome;
        }

        let envelope = self
            .auth
            .enable_two_factor(&TwoFactorCodeRequest {
                email,
                code: code.to_string(),
            })
            .await;

        if envelope.data.success() {
            log::info!("✅ [2FA] enabled");
            FormOutcome::success(envelope.message_or(ENABLED_MESSAGE)).redirect_to(
                with_message(DASHBOARD_PAGE, ENABLED_DASHBOARD_MESSAGE, MessageKind::Success),
                FORM_REDIRECT_DELAY_MS,
            )
        } else {
            FormOutcome::error(envelope.message_or(ENABLE_FAILED_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;
    use crate::utils::constants::{
        TWO_FACTOR_ENABLE_ENDPOINT, TWO_FACTOR_SETUP_ENDPOINT, TWO_FACTOR_VERIFY_ENDPOINT,
    };
    use serde_json::json;

    const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=";

    fn logged_in() -> Harness {
        let h = Harness::new();
        h.storage.set(StorageKey::Token, "abc");
        h.storage.set(StorageKey::UserRole, "ROLE_CUSTOMER");
        h.storage.set(StorageKey::UserEmail, "jane@example.com");
        h
    }

    #[test]
    fn qr_source_normalization() {
        let otpauth = "otpauth://totp/CarRental:jane?secret=JBSWY3DP&issuer=CarRental";
        assert_eq!(
            normalize_qr_source(otpauth, QR_SERVICE),
            format!("{}{}", QR_SERVICE, urlencoding::encode(otpauth))
        );
        assert_eq!(
            normalize_qr_source("iVBORw0KGgo", QR_SERVICE),
            "data:image/png;base64,iVBORw0KGgo"
        );
        assert_eq!(
            normalize_qr_source("/9j/4AAQ", QR_SERVICE),
            "data:image/png;base64,/9j/4AAQ"
        );
        assert_eq!(
            normalize_qr_source("data:image/png;base64,AAA", QR_SERVICE),
            "data:image/png;base64,AAA"
        );
        assert_eq!(
            normalize_qr_source("https://cdn.example.com/qr.png", QR_SERVICE),
            "https://cdn.example.com/qr.png"
        );
    }

    #[test]
    fn secret_extraction() {
        assert_eq!(
            extract_secret("otpauth://totp/x?secret=JBSWY3DP&issuer=y").as_deref(),
            Some("JBSWY3DP")
        );
        assert_eq!(extract_secret("otpauth://totp/x?issuer=y"), None);
    }

    #[test]
    fn verify_page_requires_auth_email() {
        let h = Harness::new();
        let vm = VerifyViewModel::new(&h.context());
        assert_eq!(vm.entry(), PageEntry::Leave("/login".into()));
        h.storage.set(StorageKey::AuthEmail, "jane@example.com");
        assert_eq!(vm.entry(), PageEntry::Ready("jane@example.com".into()));
    }

    #[tokio::test]
    async fn verify_rejects_malformed_codes_locally() {
        let h = Harness::new();
        let vm = VerifyViewModel::new(&h.context());
        for code in ["12345", "abcdef", "1234567"] {
            let outcome = vm
                .submit(&VerifyForm {
                    email: "jane@example.com".into(),
                    code: code.into(),
                })
                .await;
            assert_eq!(outcome.message.as_deref(), Some(CODE_FORMAT_MESSAGE), "{}", code);
        }
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn verify_success_stores_identity_and_routes_by_role() {
        let h = Harness::new();
        h.storage.set(StorageKey::AuthEmail, "jane@example.com");
        h.transport.respond(
            TWO_FACTOR_VERIFY_ENDPOINT,
            200,
            json!({ "success": true, "token": "t0k", "role": "ROLE_FLEET_MANAGER", "userId": 7 }),
        );
        let vm = VerifyViewModel::new(&h.context());

        let outcome = vm
            .submit(&VerifyForm {
                email: "jane@example.com".into(),
                code: "123456".into(),
            })
            .await;

        assert_eq!(outcome.message.as_deref(), Some(VERIFIED_MESSAGE));
        assert_eq!(outcome.redirect_url(), Some("/fleet-manager/dashboard"));
        assert_eq!(outcome.redirect.unwrap().delay_ms, 1_000);
        assert_eq!(h.storage.token().as_deref(), Some("t0k"));
        assert_eq!(h.storage.get(StorageKey::UserId).as_deref(), Some("7"));
        assert!(h.storage.get(StorageKey::AuthEmail).is_none());
    }

    #[tokio::test]
    async fn verify_success_without_token_still_redirects_by_role() {
        let h = Harness::new();
        h.storage.set(StorageKey::AuthEmail, "jane@example.com");
        h.storage.set(StorageKey::UserName, "Stale");
        h.transport.respond(
            TWO_FACTOR_VERIFY_ENDPOINT,
            200,
            json!({ "success": true, "message": "OK", "role": "ROLE_ADMIN" }),
        );
        let vm = VerifyViewModel::new(&h.context());

        let outcome = vm
            .submit(&VerifyForm {
                email: "jane@example.com".into(),
                code: "123456".into(),
            })
            .await;

        assert_eq!(outcome.kind, MessageKind::Success);
        assert_eq!(outcome.message.as_deref(), Some("OK"));
        assert_eq!(outcome.redirect_url(), Some("/admin/dashboard"));
        assert!(!h.storage.has_token());
        assert_eq!(h.storage.get(StorageKey::UserRole).as_deref(), Some("ROLE_ADMIN"));
        assert_eq!(h.storage.get(StorageKey::UserEmail).as_deref(), Some("jane@example.com"));
        assert!(h.storage.get(StorageKey::UserName).is_none());
        assert!(h.storage.get(StorageKey::AuthEmail).is_none());
    }

    #[tokio::test]
    async fn verify_message_mentioning_2fa_is_not_a_loop() {
        let h = Harness::new();
        h.transport.respond(
            TWO_FACTOR_VERIFY_ENDPOINT,
            200,
            json!({ "success": true, "message": "2FA verified", "token": "t0k" }),
        );
        let vm = VerifyViewModel::new(&h.context());
        let outcome = vm
            .submit(&VerifyForm {
                email: "jane@example.com".into(),
                code: "123456".into(),
            })
            .await;
        assert_eq!(outcome.kind, MessageKind::Success);
        assert_eq!(outcome.redirect_url(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn verify_failure_keeps_user_on_page() {
        let h = Harness::new();
        h.storage.set(StorageKey::AuthEmail, "jane@example.com");
        h.transport.respond(TWO_FACTOR_VERIFY_ENDPOINT, 401, json!({ "success": false }));
        let vm = VerifyViewModel::new(&h.context());

        let outcome = vm
            .submit(&VerifyForm {
                email: "jane@example.com".into(),
                code: "123456".into(),
            })
            .await;

        assert_eq!(outcome.message.as_deref(), Some(VERIFY_FAILED_MESSAGE));
        assert!(outcome.redirect.is_none());
        assert!(h.storage.get(StorageKey::AuthEmail).is_some());
        assert!(!h.storage.has_token());
    }

    #[test]
    fn setup_page_requires_token() {
        let h = Harness::new();
        let vm = TwoFactorSetupViewModel::new(&h.context());
        assert_eq!(
            vm.entry(),
            PageEntry::Leave("/login?message=Please%20log%20in%20to%20access%20this%20page&type=error".into())
        );
    }

    #[tokio::test]
    async fn setup_success_with_otpauth_uri() {
        let h = logged_in();
        let uri = "otpauth://totp/CarRental:jane?secret=JBSWY3DP&issuer=CarRental";
        h.transport.respond(TWO_FACTOR_SETUP_ENDPOINT, 200, json!({ "qrCodeUri": uri }));
        let vm = TwoFactorSetupViewModel::new(&h.context());

        let result = vm.request_qr(None, 1_700_000_000_000).await;

        let qr = result.qr.unwrap();
        assert!(qr.image_src.starts_with(QR_SERVICE));
        assert_eq!(qr.secret, "JBSWY3DP");
        assert_eq!(result.outcome.message.as_deref(), Some(SCAN_MESSAGE));
        assert_eq!(
            h.transport.body_json(TWO_FACTOR_SETUP_ENDPOINT).unwrap(),
            json!({ "email": "jane@example.com", "timestamp": 1_700_000_000_000i64 })
        );
    }

    #[tokio::test]
    async fn setup_prefers_explicit_secret() {
        let h = logged_in();
        h.transport.respond(
            TWO_FACTOR_SETUP_ENDPOINT,
            200,
            json!({ "qrCodeUri": "iVBORw0KGgo", "secretKey": "ABCDEF12" }),
        );
        let vm = TwoFactorSetupViewModel::new(&h.context());
        let qr = vm.request_qr(None, 1).await.qr.unwrap();
        assert_eq!(qr.image_src, "data:image/png;base64,iVBORw0KGgo");
        assert_eq!(qr.secret, "ABCDEF12");
    }

    #[tokio::test]
    async fn setup_without_secret_says_so() {
        let h = logged_in();
        h.transport.respond(
            TWO_FACTOR_SETUP_ENDPOINT,
            200,
            json!({ "qrCodeUri": "data:image/png;base64,AAA" }),
        );
        let vm = TwoFactorSetupViewModel::new(&h.context());
        assert_eq!(vm.request_qr(None, 1).await.qr.unwrap().secret, SECRET_UNAVAILABLE);
    }

    #[tokio::test]
    async fn setup_uses_page_email_when_session_has_none() {
        let h = Harness::new();
        h.storage.set(StorageKey::Token, "abc");
        h.transport.respond(TWO_FACTOR_SETUP_ENDPOINT, 200, json!({ "qrCodeUri": "data:image/png;base64,AAA" }));
        let vm = TwoFactorSetupViewModel::new(&h.context());

        vm.request_qr(Some("jane@example.com"), 1).await;

        assert_eq!(h.storage.get(StorageKey::UserEmail).as_deref(), Some("jane@example.com"));
        assert_eq!(
            h.transport.body_json(TWO_FACTOR_SETUP_ENDPOINT).unwrap()["email"],
            "jane@example.com"
        );
    }

    #[tokio::test]
    async fn setup_without_any_email_fails_locally() {
        let h = Harness::new();
        h.storage.set(StorageKey::Token, "abc");
        let vm = TwoFactorSetupViewModel::new(&h.context());
        let result = vm.request_qr(None, 1).await;
        assert!(result.qr.is_none());
        assert_eq!(result.outcome.message.as_deref(), Some(SETUP_NO_EMAIL_MESSAGE));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn setup_401_forces_logout() {
        let h = logged_in();
        h.transport.respond(TWO_FACTOR_SETUP_ENDPOINT, 401, json!({ "message": "Unauthorized" }));
        let vm = TwoFactorSetupViewModel::new(&h.context());

        let result = vm.request_qr(None, 1).await;

        assert!(result.qr.is_none());
        assert_eq!(result.outcome.message.as_deref(), Some(SETUP_SESSION_EXPIRED_MESSAGE));
        let redirect = result.outcome.redirect.clone().unwrap();
        assert_eq!(redirect.delay_ms, 3_000);
        assert_eq!(
            result.outcome.redirect_url(),
            Some("/login?message=Session%20expired.%20Please%20log%20in%20again.&type=error")
        );
        assert!(!h.storage.has_token());
        assert!(h.storage.get(StorageKey::UserRole).is_none());
        assert_eq!(h.storage.get(StorageKey::UserEmail).as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn setup_failure_statuses() {
        for (status, expected) in [
            (404, SETUP_USER_NOT_FOUND_MESSAGE),
            (500, SETUP_SERVER_ERROR_MESSAGE),
            (400, "Bad request"),
        ] {
            let h = logged_in();
            h.transport.respond(TWO_FACTOR_SETUP_ENDPOINT, status, json!({ "message": "Bad request" }));
            let vm = TwoFactorSetupViewModel::new(&h.context());
            let result = vm.request_qr(None, 1).await;
            assert_eq!(result.outcome.message.as_deref(), Some(expected));
            assert!(h.storage.has_token());
        }
    }

    #[tokio::test]
    async fn ok_status_without_qr_is_a_failure() {
        let h = logged_in();
        h.transport.respond(TWO_FACTOR_SETUP_ENDPOINT, 200, json!({ "success": true }));
        let vm = TwoFactorSetupViewModel::new(&h.context());
        let result = vm.request_qr(None, 1).await;
        assert!(result.qr.is_none());
        assert_eq!(result.outcome.message.as_deref(), Some(SETUP_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn enable_success_goes_to_dashboard() {
        let h = logged_in();
        h.transport.respond(TWO_FACTOR_ENABLE_ENDPOINT, 200, json!({ "success": true }));
        let vm = TwoFactorSetupViewModel::new(&h.context());

        let outcome = vm.enable("654321").await;

        assert_eq!(outcome.message.as_deref(), Some(ENABLED_MESSAGE));
        assert_eq!(
            outcome.redirect_url(),
            Some("/dashboard?message=Two-factor%20authentication%20has%20been%20enabled%20for%20your%20account.&type=success")
        );
        assert_eq!(outcome.redirect.unwrap().delay_ms, 2_000);
        assert_eq!(
            h.transport.body_json(TWO_FACTOR_ENABLE_ENDPOINT).unwrap(),
            json!({ "email": "jane@example.com", "code": "654321" })
        );
    }

    #[tokio::test]
    async fn enable_falls_back_to_auth_email() {
        let h = Harness::new();
        h.storage.set(StorageKey::AuthEmail, "pending@example.com");
        h.transport.respond(TWO_FACTOR_ENABLE_ENDPOINT, 400, json!({ "success": false }));
        let vm = TwoFactorSetupViewModel::new(&h.context());

        let outcome = vm.enable("654321").await;

        assert_eq!(outcome.message.as_deref(), Some(ENABLE_FAILED_MESSAGE));
        assert_eq!(
            h.transport.body_json(TWO_FACTOR_ENABLE_ENDPOINT).unwrap()["email"],
            "pending@example.com"
        );
    }

    #[tokio::test]
    async fn enable_without_email_or_with_bad_code() {
        let h = Harness::new();
        let vm = TwoFactorSetupViewModel::new(&h.context());
        assert_eq!(vm.enable("654321").await.message.as_deref(), Some(ENABLE_NO_EMAIL_MESSAGE));

        let h = logged_in();
        let vm = TwoFactorSetupViewModel::new(&h.context());
        assert_eq!(vm.enable("65432").await.message.as_deref(), Some(CODE_FORMAT_MESSAGE));
        assert!(h.transport.requests().is_empty());
    }
}
