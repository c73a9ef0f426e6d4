use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::{double_option, string_or_number};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_code: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TwoFactorSetupRequest {
    pub email: String,
    /// Milliseconds since epoch, keeps intermediaries from caching the QR.
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetupResponse {
    #[serde(default)]
    pub qr_code_uri: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for both `/2fa/verify` and `/2fa/enable`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TwoFactorCodeRequest {
    pub email: String,
    pub code: String,
}

/// Explicit outcome discriminant sent by newer backends.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthStatus {
    Success,
    #[serde(rename = "REQUIRES_2FA")]
    RequiresTwoFactor,
    Failure,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// `Some(None)` is an explicit `null`, which older backends use to mean "2FA pending".
    #[serde(default, deserialize_with = "double_option")]
    pub token: Option<Option<String>>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub status: Option<AuthStatus>,
}

/// Who is logged in, as persisted after a successful login or 2FA check.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Identity {
    pub token: String,
    pub role: Option<String>,
    pub user_name: Option<String>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub customer_id: Option<String>,
}

/// Classified login/verify response.
#[derive(Clone, PartialEq, Debug)]
pub enum AuthOutcome {
    RequiresTwoFactor,
    Authenticated(Identity),
    /// Backend reported success but handed back no token.
    MissingToken,
    Failed(Option<String>),
}

impl AuthResponse {
    fn token_value(&self) -> Option<&str> {
        self.token
            .as_ref()
            .and_then(|t| t.as_deref())
            .filter(|t| !t.is_empty())
    }

    fn message_mentions_2fa(&self) -> bool {
        self.message.as_deref().is_some_and(|m| m.contains("2FA"))
    }

    /// Uses `status` when the backend sends it; otherwise a successful
    /// response mentioning "2FA" or carrying `token: null` means 2FA is pending.
    pub fn outcome(&self) -> AuthOutcome {
        let requires_2fa = match self.status {
            Some(AuthStatus::RequiresTwoFactor) => true,
            Some(AuthStatus::Failure) => return AuthOutcome::Failed(self.message.clone()),
            Some(AuthStatus::Success) => false,
            None => {
                if !self.success {
                    return AuthOutcome::Failed(self.message.clone());
                }
                self.message_mentions_2fa() || matches!(self.token, Some(None))
            }
        };

        if requires_2fa {
            return AuthOutcome::RequiresTwoFactor;
        }

        match self.token_value() {
            Some(token) => AuthOutcome::Authenticated(self.identity(token)),
            None => AuthOutcome::MissingToken,
        }
    }

    /// Outcome for the 2FA verify step, where "2FA" in the message is not a signal.
    /// A verified response without a token still counts: whatever identity
    /// fields came back are stored and the user moves on.
    pub fn verify_outcome(&self) -> AuthOutcome {
        if matches!(self.status, Some(AuthStatus::Failure)) || (self.status.is_none() && !self.success) {
            return AuthOutcome::Failed(self.message.clone());
        }
        AuthOutcome::Authenticated(self.identity(self.token_value().unwrap_or_default()))
    }

    fn identity(&self, token: &str) -> Identity {
        Identity {
            token: token.to_string(),
            role: self.role.clone().filter(|r| !r.is_empty()),
            user_name: self.user_name.clone().filter(|v| !v.is_empty()),
            user_id: self.user_id.clone(),
            user_email: self.user_email.clone().filter(|v| !v.is_empty()),
            customer_id: self.customer_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AuthResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn explicit_status_wins() {
        let r = parse(r#"{"success":true,"status":"REQUIRES_2FA","token":"abc"}"#);
        assert_eq!(r.outcome(), AuthOutcome::RequiresTwoFactor);

        let r = parse(r#"{"success":true,"status":"SUCCESS","message":"2FA is on","token":"abc"}"#);
        assert!(matches!(r.outcome(), AuthOutcome::Authenticated(_)));

        let r = parse(r#"{"success":true,"status":"FAILURE","message":"Locked"}"#);
        assert_eq!(r.outcome(), AuthOutcome::Failed(Some("Locked".into())));
    }

    #[test]
    fn legacy_null_token_means_2fa() {
        let r = parse(r#"{"success":true,"message":"Please complete 2FA verification.","token":null}"#);
        assert_eq!(r.outcome(), AuthOutcome::RequiresTwoFactor);

        let r = parse(r#"{"success":true,"message":"OK","token":null}"#);
        assert_eq!(r.outcome(), AuthOutcome::RequiresTwoFactor);
    }

    #[test]
    fn missing_token_is_not_2fa() {
        let r = parse(r#"{"success":true,"message":"OK"}"#);
        assert_eq!(r.outcome(), AuthOutcome::MissingToken);
    }

    #[test]
    fn authenticated_identity_accepts_numeric_ids() {
        let r = parse(
            r#"{"success":true,"token":"abc","role":"ROLE_ADMIN","userName":"Jane","userId":12,"customerId":"C-4"}"#,
        );
        let AuthOutcome::Authenticated(identity) = r.outcome() else {
            panic!("expected identity");
        };
        assert_eq!(identity.token, "abc");
        assert_eq!(identity.role.as_deref(), Some("ROLE_ADMIN"));
        assert_eq!(identity.user_id.as_deref(), Some("12"));
        assert_eq!(identity.customer_id.as_deref(), Some("C-4"));
        assert_eq!(identity.user_email, None);
    }

    #[test]
    fn unsuccessful_legacy_response_fails() {
        let r = parse(r#"{"success":false,"message":"Bad credentials"}"#);
        assert_eq!(r.outcome(), AuthOutcome::Failed(Some("Bad credentials".into())));
    }

    #[test]
    fn verify_ignores_2fa_wording() {
        let r = parse(r#"{"success":true,"message":"2FA verified","token":"t"}"#);
        assert!(matches!(r.verify_outcome(), AuthOutcome::Authenticated(_)));
    }

    #[test]
    fn verify_without_token_still_authenticates() {
        let r = parse(r#"{"success":true,"message":"OK","role":"ROLE_ADMIN"}"#);
        let AuthOutcome::Authenticated(identity) = r.verify_outcome() else {
            panic!("expected identity");
        };
        assert!(identity.token.is_empty());
        assert_eq!(identity.role.as_deref(), Some("ROLE_ADMIN"));
    }

    #[test]
    fn register_omits_code_for_customers() {
        let req = RegisterRequest {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            password: "secret1".into(),
            role_name: "ROLE_CUSTOMER".into(),
            registration_code: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["roleName"], "ROLE_CUSTOMER");
        assert!(json.get("registrationCode").is_none());
    }
}
