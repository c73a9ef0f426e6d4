// ============================================================================
// SESSION STATE - Who is logged in, flow hand-offs, flash and theme
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::auth::Identity;
use crate::state::storage::{ClientStorage, StorageKey};
use crate::viewmodels::message::MessageKind;

/// One-shot message carried across a navigation in session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl FlashMessage {
    pub fn kind(&self) -> MessageKind {
        self.kind.as_deref().map(MessageKind::parse).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone)]
pub struct SessionState {
    storage: ClientStorage,
}

impl SessionState {
    pub fn new(storage: ClientStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &ClientStorage {
        &self.storage
    }

    pub fn is_authenticated(&self) -> bool {
        self.storage.has_token()
    }

    /// Replaces any previous identity. The theme survives.
    /// `fallback_email` is kept when the backend does not echo the email.
    pub fn store_identity(&self, identity: &Identity, fallback_email: Option<&str>) {
        self.clear_identity();
        self.storage.set_opt(
            StorageKey::Token,
            Some(identity.token.as_str()).filter(|t| !t.is_empty()),
        );
        self.storage.set_opt(StorageKey::UserRole, identity.role.as_deref());
        self.storage.set_opt(StorageKey::UserName, identity.user_name.as_deref());
        self.storage.set_opt(StorageKey::UserId, identity.user_id.as_deref());
        self.storage.set_opt(
            StorageKey::UserEmail,
            identity.user_email.as_deref().or(fallback_email),
        );
        self.storage.set_opt(StorageKey::CustomerId, identity.customer_id.as_deref());
        log::info!(
            "✅ [SESSION] identity stored (role: {})",
            identity.role.as_deref().unwrap_or("-")
        );
    }

    pub fn clear_identity(&self) {
        for key in StorageKey::IDENTITY {
            self.storage.remove(key);
        }
    }

    /// Forced logout after the backend rejected the token.
    pub fn expire(&self) {
        self.storage.remove(StorageKey::Token);
        self.storage.remove(StorageKey::UserRole);
        log::warn!("⚠️ [SESSION] session expired, token dropped");
    }

    pub fn user_email(&self) -> Option<String> {
        self.storage.get(StorageKey::UserEmail)
    }

    pub fn set_user_email(&self, email: &str) {
        self.storage.set(StorageKey::UserEmail, email);
    }

    pub fn auth_email(&self) -> Option<String> {
        self.storage.get(StorageKey::AuthEmail)
    }

    pub fn reset_email(&self) -> Option<String> {
        self.storage.get(StorageKey::ResetEmail)
    }

    /// Returns the stored flash message once, then forgets it.
    pub fn take_flash(&self) -> Option<FlashMessage> {
        let flash = self.storage.get_json::<FlashMessage>(StorageKey::FlashMessage);
        self.storage.remove(StorageKey::FlashMessage);
        flash.filter(|f| !f.message.is_empty())
    }

    pub fn set_flash(&self, message: &str, kind: MessageKind) {
        let flash = FlashMessage {
            message: message.to_string(),
            kind: Some(kind.as_str().to_string()),
        };
        if let Err(e) = self.storage.set_json(StorageKey::FlashMessage, &flash) {
            log::warn!("⚠️ [SESSION] {}", e);
        }
    }

    pub fn theme(&self) -> Theme {
        match self.storage.get(StorageKey::Theme).as_deref() {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.storage.set(StorageKey::Theme, theme.as_str());
    }
}

/// Pages a logged-in user should not see again.
pub fn is_auth_page(path: &str) -> bool {
    path.contains("login") || path.contains("register")
}
