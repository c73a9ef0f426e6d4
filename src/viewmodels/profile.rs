// ============================================================================
// PROFILE VIEWMODEL - Account editor, customer profile, password change
// ============================================================================

use crate::models::api::ApiEnvelope;
use crate::models::profile::{
    AccountSnapshot, AccountUpdateRequest, ChangePasswordRequest, CustomerFields,
    ProfileUpdateRequest, StaffFields,
};
use crate::services::profile_service::ProfileService;
use crate::state::session::SessionState;
use crate::state::storage::StorageKey;
use crate::utils::constants::{PROFILE_PAGE, PROFILE_RELOAD_DELAY_MS};
use crate::utils::validation::{is_strong_password, validate_form, FieldInput};
use crate::viewmodels::context::PageContext;
use crate::viewmodels::form::FormOutcome;

pub const SAVING_PROFILE_MESSAGE: &str = "Saving your profile...";
pub const SAVING_ACCOUNT_MESSAGE: &str = "Saving changes...";
const ACCOUNT_SAVED_MESSAGE: &str = "Profile updated successfully!";
const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully";
const PROFILE_FAILED_MESSAGE: &str = "An error occurred while updating your profile.";
const NAMES_REQUIRED_MESSAGE: &str = "First name and last name are required";
const PASSWORD_UPDATED_MESSAGE: &str = "Password updated successfully";
const PASSWORD_FAILED_MESSAGE: &str = "Error updating password";

/// Account editor inputs. Groups are `None` when the page did not render them.
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_name: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub customer: Option<CustomerFields>,
    pub staff: Option<StaffFields>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_postal_code: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

pub struct ProfileViewModel {
    profiles: ProfileService,
    session: SessionState,
    min_password_length: usize,
    /// `?email=` of the page, which wins over the form's email field.
    query_email: Option<String>,
}

impl ProfileViewModel {
    pub fn new(ctx: &PageContext, query_email: Option<&str>) -> Self {
        Self {
            profiles: ProfileService::new(ctx.gateway.clone(), ctx.config.account_update_route),
            session: ctx.session.clone(),
            min_password_length: ctx.config.min_password_length,
            query_email: query_email.filter(|e| !e.is_empty()).map(str::to_string),
        }
    }

    fn target_email(&self, page_email: &str) -> Option<String> {
        self.query_email.clone().or_else(|| {
            let page_email = page_email.trim();
            (!page_email.is_empty()).then(|| page_email.to_string())
        })
    }

    // ========================================================================
    // Account editor
    // ========================================================================

    fn account_request(&self, form: &AccountForm) -> Result<AccountUpdateRequest, FormOutcome> {
        validate_form(
            &[
                FieldInput::text("firstName", &form.first_name),
                FieldInput::text("lastName", &form.last_name),
                FieldInput::email("email", &form.email),
            ],
            self.min_password_length,
        )?;

        let password = if form.password.is_empty() {
            None
        } else if form.password == form.confirm_password {
            Some(form.password.clone())
        } else {
            return Err(FormOutcome::error("Passwords don't match").mark_invalid("confirmPassword"));
        };

        Ok(AccountUpdateRequest {
            user_id: form.user_id.clone(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            role_name: form.role_name.clone(),
            password,
            customer: form.customer.clone().map(|c| CustomerFields {
                is_customer: true,
                ..c
            }),
            staff: form.staff.clone().map(|s| StaffFields { is_staff: true, ..s }),
        })
    }

    pub async fn save_account(&self, form: &AccountForm) -> FormOutcome {
        let request = match self.account_request(form) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        let envelope = self.profiles.update_account(&request).await;
        if !envelope.is_ok() {
            log::warn!("⚠️ [PROFILE] account update failed with {}", envelope.status);
            return FormOutcome::error(format!("Error: {}", account_error(&envelope)));
        }

        let saved: AccountSnapshot = envelope.data.decode().unwrap_or_default();
        let name = saved
            .display_name()
            .unwrap_or_else(|| format!("{} {}", request.first_name, request.last_name));
        let email = saved.email.unwrap_or(request.email);
        self.session.storage().set(StorageKey::UserName, &name);
        self.session.set_user_email(&email);
        log::info!("✅ [PROFILE] account {} saved", request.user_id);

        FormOutcome::success(ACCOUNT_SAVED_MESSAGE)
            .redirect_to(format!("{}?success=true", PROFILE_PAGE), PROFILE_RELOAD_DELAY_MS)
    }

    // ========================================================================
    // Customer profile
    // ========================================================================

    pub async fn save_profile(&self, form: &ProfileForm) -> FormOutcome {
        let first_name = form.first_name.trim();
        let last_name = form.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            let mut outcome = FormOutcome::error(NAMES_REQUIRED_MESSAGE);
            if first_name.is_empty() {
                outcome = outcome.mark_invalid("firstName");
            }
            if last_name.is_empty() {
                outcome = outcome.mark_invalid("lastName");
            }
            return outcome;
        }

        let request = ProfileUpdateRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: form.email.trim().to_string(),
            contact_number: trimmed(&form.contact_number),
            address_street: trimmed(&form.address_street),
            address_city: trimmed(&form.address_city),
            address_postal_code: trimmed(&form.address_postal_code),
        };
        let email = self.target_email(&form.email);
        let envelope = self.profiles.update_profile(email.as_deref(), &request).await;

        if envelope.data.success() {
            FormOutcome::success(envelope.message_or(PROFILE_SAVED_MESSAGE))
                .reload_after(PROFILE_RELOAD_DELAY_MS)
        } else {
            FormOutcome::error(envelope.message_or(PROFILE_FAILED_MESSAGE))
        }
    }

    // ========================================================================
    // Password change
    // ========================================================================

    /// Every failing field is flagged at once, without a message.
    pub fn validate_password(form: &PasswordForm) -> Result<(), FormOutcome> {
        let mut invalid = Vec::new();
        if form.current_password.is_empty() {
            invalid.push("currentPassword".to_string());
        }
        if !is_strong_password(&form.new_password) {
            invalid.push("newPassword".to_string());
        }
        if form.new_password != form.confirm_password {
            invalid.push("confirmPassword".to_string());
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(FormOutcome::silent_error(invalid))
        }
    }

    pub async fn change_password(&self, form: &PasswordForm, page_email: &str) -> FormOutcome {
        if let Err(outcome) = Self::validate_password(form) {
            return outcome;
        }

        let request = ChangePasswordRequest {
            current_password: form.current_password.clone(),
            new_password: form.new_password.clone(),
            confirm_password: form.confirm_password.clone(),
        };
        let email = self.target_email(page_email);
        let envelope = self.profiles.change_password(email.as_deref(), &request).await;

        if envelope.is_ok() && envelope.data.success() {
            log::info!("✅ [PROFILE] password changed");
            FormOutcome::success(envelope.message_or(PASSWORD_UPDATED_MESSAGE)).reset()
        } else {
            FormOutcome::error(envelope.message_or(PASSWORD_FAILED_MESSAGE))
        }
    }
}

fn account_error(envelope: &ApiEnvelope) -> String {
    envelope
        .data
        .str("error")
        .or_else(|| envelope.data.message())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Failed to update profile: HTTP {}", envelope.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountUpdateRoute, AppConfig};
    use crate::services::testing::Harness;
    use crate::services::transport::HttpMethod;
    use crate::utils::constants::{
        ACCOUNT_UPDATE_POST_ENDPOINT, ACCOUNT_UPDATE_PUT_ENDPOINT, CHANGE_PASSWORD_ENDPOINT,
        PROFILE_UPDATE_ENDPOINT,
    };
    use crate::viewmodels::form::Navigation;
    use crate::viewmodels::message::MessageKind;
    use serde_json::json;

    fn account() -> AccountForm {
        AccountForm {
            user_id: "12".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        }
    }

    fn strong() -> PasswordForm {
        PasswordForm {
            current_password: "old-pass".into(),
            new_password: "Secur3!pass".into(),
            confirm_password: "Secur3!pass".into(),
        }
    }

    #[tokio::test]
    async fn account_save_refreshes_stored_identity() {
        let h = Harness::new();
        h.transport.respond(
            ACCOUNT_UPDATE_PUT_ENDPOINT,
            200,
            json!({ "firstName": "Janet", "lastName": "Doe", "email": "janet@example.com" }),
        );
        let vm = ProfileViewModel::new(&h.context(), None);

        let outcome = vm.save_account(&account()).await;

        assert_eq!(outcome.message.as_deref(), Some(ACCOUNT_SAVED_MESSAGE));
        assert_eq!(outcome.redirect_url(), Some("/profile?success=true"));
        assert_eq!(h.storage.get(StorageKey::UserName).as_deref(), Some("Janet Doe"));
        assert_eq!(
            h.storage.get(StorageKey::UserEmail).as_deref(),
            Some("janet@example.com")
        );
        let request = h.transport.request_to(ACCOUNT_UPDATE_PUT_ENDPOINT).unwrap();
        assert_eq!(request.method, HttpMethod::Put);
    }

    #[tokio::test]
    async fn account_save_without_echo_uses_submitted_values() {
        let mut config = AppConfig::default();
        config.account_update_route = AccountUpdateRoute::Post;
        let h = Harness::with_config(config);
        h.transport.respond_raw(ACCOUNT_UPDATE_POST_ENDPOINT, 200, "OK", "<html></html>");
        let vm = ProfileViewModel::new(&h.context(), None);

        let outcome = vm.save_account(&account()).await;

        assert_eq!(outcome.kind, MessageKind::Success);
        assert_eq!(h.storage.get(StorageKey::UserName).as_deref(), Some("Jane Doe"));
        assert_eq!(h.transport.calls_to(ACCOUNT_UPDATE_POST_ENDPOINT), 1);
    }

    #[tokio::test]
    async fn account_password_requires_confirmation() {
        let h = Harness::new();
        let vm = ProfileViewModel::new(&h.context(), None);
        let mut form = account();
        form.password = "newpass1".into();
        form.confirm_password = "newpass2".into();

        let outcome = vm.save_account(&form).await;

        assert_eq!(outcome.message.as_deref(), Some("Passwords don't match"));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn account_groups_are_flagged() {
        let h = Harness::new();
        h.transport.respond(ACCOUNT_UPDATE_PUT_ENDPOINT, 200, json!({}));
        let vm = ProfileViewModel::new(&h.context(), None);
        let mut form = account();
        form.password = "newpass1".into();
        form.confirm_password = "newpass1".into();
        form.staff = Some(StaffFields {
            staff_id_code: "ST-9".into(),
            department: Some("Fleet".into()),
            ..Default::default()
        });

        vm.save_account(&form).await;

        let body = h.transport.body_json(ACCOUNT_UPDATE_PUT_ENDPOINT).unwrap();
        assert_eq!(body["password"], "newpass1");
        assert_eq!(body["staffIdCode"], "ST-9");
        assert_eq!(body["isStaff"], true);
        assert!(body.get("isCustomer").is_none());
    }

    #[tokio::test]
    async fn account_failure_reports_status() {
        let h = Harness::new();
        h.transport.respond_raw(ACCOUNT_UPDATE_PUT_ENDPOINT, 500, "", "");
        let vm = ProfileViewModel::new(&h.context(), None);

        let outcome = vm.save_account(&account()).await;

        assert!(outcome.is_error());
        assert_eq!(
            outcome.message.as_deref(),
            Some("Error: Failed to update profile: HTTP 500")
        );
        assert!(h.storage.get(StorageKey::UserName).is_none());
    }

    #[tokio::test]
    async fn profile_names_are_required() {
        let h = Harness::new();
        let vm = ProfileViewModel::new(&h.context(), None);
        let outcome = vm
            .save_profile(&ProfileForm {
                first_name: "Jane".into(),
                email: "jane@example.com".into(),
                ..Default::default()
            })
            .await;
        assert_eq!(outcome.message.as_deref(), Some(NAMES_REQUIRED_MESSAGE));
        assert_eq!(outcome.invalid_fields, vec!["lastName".to_string()]);
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn profile_save_reloads_page() {
        let h = Harness::new();
        h.transport.respond(
            PROFILE_UPDATE_ENDPOINT,
            200,
            json!({ "success": true, "message": "Saved" }),
        );
        let vm = ProfileViewModel::new(&h.context(), Some("other@example.com"));

        let outcome = vm
            .save_profile(&ProfileForm {
                first_name: " Jane ".into(),
                last_name: "Doe".into(),
                email: "jane@example.com".into(),
                contact_number: Some(" 0771234567 ".into()),
                ..Default::default()
            })
            .await;

        assert_eq!(outcome.message.as_deref(), Some("Saved"));
        let redirect = outcome.redirect.unwrap();
        assert_eq!(redirect.target, Navigation::Reload);
        assert_eq!(redirect.delay_ms, 1_500);
        let request = h.transport.request_to(PROFILE_UPDATE_ENDPOINT).unwrap();
        assert!(request.url.ends_with("?email=other%40example.com"));
        let body = h.transport.body_json(PROFILE_UPDATE_ENDPOINT).unwrap();
        assert_eq!(body["firstName"], "Jane");
        assert_eq!(body["contactNumber"], "0771234567");
        assert!(body["addressCity"].is_null());
    }

    #[tokio::test]
    async fn profile_failure_shows_backend_message() {
        let h = Harness::new();
        h.transport.respond(
            PROFILE_UPDATE_ENDPOINT,
            400,
            json!({ "success": false, "message": "Email cannot change" }),
        );
        let vm = ProfileViewModel::new(&h.context(), None);
        let outcome = vm
            .save_profile(&ProfileForm {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@example.com".into(),
                ..Default::default()
            })
            .await;
        assert_eq!(outcome.message.as_deref(), Some("Email cannot change"));
        assert!(outcome.redirect.is_none());
    }

    #[test]
    fn password_rules_flag_every_field() {
        let outcome = ProfileViewModel::validate_password(&PasswordForm {
            current_password: String::new(),
            new_password: "weakpass".into(),
            confirm_password: "other".into(),
        })
        .unwrap_err();
        assert_eq!(outcome.message, None);
        assert_eq!(
            outcome.invalid_fields,
            vec!["currentPassword", "newPassword", "confirmPassword"]
        );
        assert!(ProfileViewModel::validate_password(&strong()).is_ok());
    }

    #[tokio::test]
    async fn password_change_resets_form() {
        let h = Harness::new();
        h.transport.respond(CHANGE_PASSWORD_ENDPOINT, 200, json!({ "success": true }));
        let vm = ProfileViewModel::new(&h.context(), None);

        let outcome = vm.change_password(&strong(), "jane@example.com").await;

        assert_eq!(outcome.message.as_deref(), Some(PASSWORD_UPDATED_MESSAGE));
        assert!(outcome.reset_form);
        let request = h.transport.request_to(CHANGE_PASSWORD_ENDPOINT).unwrap();
        assert!(request.url.ends_with("?email=jane%40example.com"));
        assert_eq!(
            h.transport.body_json(CHANGE_PASSWORD_ENDPOINT).unwrap()["confirmPassword"],
            "Secur3!pass"
        );
    }

    #[tokio::test]
    async fn password_change_failure() {
        let h = Harness::new();
        h.transport.respond(CHANGE_PASSWORD_ENDPOINT, 200, json!({ "success": false }));
        let vm = ProfileViewModel::new(&h.context(), None);
        let outcome = vm.change_password(&strong(), "").await;
        assert_eq!(outcome.message.as_deref(), Some(PASSWORD_FAILED_MESSAGE));
        assert!(!outcome.reset_form);
    }
}
