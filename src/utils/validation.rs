// ============================================================================
// VALIDATION - Client-side form rules (no network involved)
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

/// Special characters accepted by the change-password rule.
const PASSWORD_SPECIALS: &str = "@$!%*#?&";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Field(String),
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please fill in all required fields correctly")]
    RequiredFields,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_password(password: &str, min_len: usize) -> bool {
    password.chars().count() >= min_len
}

/// Six ASCII digits, nothing else.
pub fn is_valid_otp(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// At least 8 characters drawn from letters, digits and `@$!%*#?&`,
/// with one of each class present.
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().count() < 8 {
        return false;
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
}

/// One input as seen by `validate_form`.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldInput {
    pub fn new(name: &str, value: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            kind,
            required,
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self::new(name, value, FieldKind::Text, true)
    }

    pub fn email(name: &str, value: &str) -> Self {
        Self::new(name, value, FieldKind::Email, true)
    }

    pub fn password(name: &str, value: &str) -> Self {
        Self::new(name, value, FieldKind::Password, true)
    }
}

/// Result of a failed `validate_form`: the message to show and the fields to flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub error: ValidationError,
    pub invalid_fields: BTreeSet<String>,
}

/// Generic check used by every auth form before it reaches the network.
///
/// Blank required fields and malformed emails are flagged together; the first
/// password field (when required) must meet `min_password_len`, and a field named
/// `passwordConfirm` must equal it.
pub fn validate_form(fields: &[FieldInput], min_password_len: usize) -> Result<(), FormErrors> {
    let mut invalid = BTreeSet::new();

    for field in fields.iter().filter(|f| f.required) {
        if field.value.trim().is_empty() {
            invalid.insert(field.name.clone());
        }
        if field.kind == FieldKind::Email && !is_valid_email(&field.value) {
            invalid.insert(field.name.clone());
        }
    }

    let password = fields.iter().find(|f| f.kind == FieldKind::Password);
    if let Some(password) = password {
        if password.required && !is_valid_password(&password.value, min_password_len) {
            invalid.insert(password.name.clone());
            return Err(FormErrors {
                error: ValidationError::PasswordTooShort(min_password_len),
                invalid_fields: invalid,
            });
        }

        if let Some(confirm) = fields.iter().find(|f| f.name == "passwordConfirm") {
            if confirm.value != password.value {
                invalid.insert(confirm.name.clone());
                return Err(FormErrors {
                    error: ValidationError::PasswordMismatch,
                    invalid_fields: invalid,
                });
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(FormErrors {
            error: ValidationError::RequiredFields,
            invalid_fields: invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b@c.co"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn otp_rule_accepts_only_six_digits() {
        assert!(is_valid_otp("123456"));
        assert!(is_valid_otp("000000"));
        assert!(!is_valid_otp("12345"));
        assert!(!is_valid_otp("1234567"));
        assert!(!is_valid_otp("12a456"));
        assert!(!is_valid_otp("١٢٣٤٥٦"));
        assert!(!is_valid_otp(" 12345"));
    }

    #[test]
    fn strong_password_rule() {
        assert!(is_strong_password("abc123!x"));
        assert!(!is_strong_password("abc123xx"));
        assert!(!is_strong_password("abcdefg!"));
        assert!(!is_strong_password("a1!"));
        assert!(!is_strong_password("abc 123!x"));
    }

    #[test]
    fn blank_required_fields_fail() {
        let fields = vec![
            FieldInput::email("email", ""),
            FieldInput::text("firstName", "   "),
        ];
        let errors = validate_form(&fields, 6).unwrap_err();
        assert_eq!(errors.error, ValidationError::RequiredFields);
        assert!(errors.invalid_fields.contains("email"));
        assert!(errors.invalid_fields.contains("firstName"));
    }

    #[test]
    fn short_password_reported_before_generic_error() {
        let fields = vec![
            FieldInput::email("email", "jane@example.com"),
            FieldInput::password("password", "123"),
        ];
        let errors = validate_form(&fields, 6).unwrap_err();
        assert_eq!(errors.error.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn confirmation_must_match() {
        let fields = vec![
            FieldInput::password("password", "secret1"),
            FieldInput::new("passwordConfirm", "secret2", FieldKind::Password, true),
        ];
        let errors = validate_form(&fields, 6).unwrap_err();
        assert_eq!(errors.error, ValidationError::PasswordMismatch);
        assert!(errors.invalid_fields.contains("passwordConfirm"));
    }

    #[test]
    fn valid_form_passes() {
        let fields = vec![
            FieldInput::email("email", "jane@example.com"),
            FieldInput::password("password", "secret1"),
            FieldInput::new("passwordConfirm", "secret1", FieldKind::Password, true),
            FieldInput::new("registrationCode", "", FieldKind::Text, false),
        ];
        assert!(validate_form(&fields, 6).is_ok());
    }
}
