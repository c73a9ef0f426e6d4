// ============================================================================
// CLIENT STORAGE - Key/value persistence behind a trait
// ============================================================================
// Browser pages use localStorage / sessionStorage; tests use MemoryStore.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("could not write '{0}'")]
    Write(String),
    #[error("could not serialize '{key}': {reason}")]
    Serialize { key: String, reason: String },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Local,
    Session,
}

/// Every key the front-end reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    UserEmail,
    UserRole,
    UserName,
    UserId,
    CustomerId,
    Theme,
    ResetEmail,
    AuthEmail,
    FlashMessage,
}

impl StorageKey {
    /// Keys written on login and wiped when a new identity is stored.
    pub const IDENTITY: [StorageKey; 6] = [
        StorageKey::Token,
        StorageKey::UserEmail,
        StorageKey::UserRole,
        StorageKey::UserName,
        StorageKey::UserId,
        StorageKey::CustomerId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::UserEmail => "userEmail",
            Self::UserRole => "userRole",
            Self::UserName => "userName",
            Self::UserId => "userId",
            Self::CustomerId => "customerId",
            Self::Theme => "theme",
            Self::ResetEmail => "reset_email",
            Self::AuthEmail => "auth_email",
            Self::FlashMessage => "flashMessage",
        }
    }

    pub fn scope(&self) -> StorageScope {
        match self {
            Self::ResetEmail | Self::AuthEmail | Self::FlashMessage => StorageScope::Session,
            _ => StorageScope::Local,
        }
    }
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

/// `window.localStorage` / `window.sessionStorage`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("⚠️ [STORAGE] localStorage unavailable");
        }
        Self { storage }
    }

    pub fn session() -> Self {
        let storage = web_sys::window().and_then(|w| w.session_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("⚠️ [STORAGE] sessionStorage unavailable");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.clear();
        }
    }
}

/// Both storage areas, addressed through typed keys.
#[derive(Clone)]
pub struct ClientStorage {
    local: Rc<dyn KeyValueStore>,
    session: Rc<dyn KeyValueStore>,
}

impl ClientStorage {
    pub fn new(local: Rc<dyn KeyValueStore>, session: Rc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStore::local()), Rc::new(BrowserStore::session()))
    }

    fn area(&self, key: StorageKey) -> &dyn KeyValueStore {
        match key.scope() {
            StorageScope::Local => self.local.as_ref(),
            StorageScope::Session => self.session.as_ref(),
        }
    }

    /// Empty values read as absent.
    pub fn get(&self, key: StorageKey) -> Option<String> {
        self.area(key).get(key.as_str()).filter(|v| !v.is_empty())
    }

    /// Write failures are logged, not propagated.
    pub fn set(&self, key: StorageKey, value: &str) {
        if let Err(e) = self.area(key).set(key.as_str(), value) {
            log::warn!("⚠️ [STORAGE] {}", e);
        }
    }

    /// Sets the key when `value` is present, removes it otherwise.
    pub fn set_opt(&self, key: StorageKey, value: Option<&str>) {
        match value {
            Some(v) => self.set(key, v),
            None => self.remove(key),
        }
    }

    pub fn remove(&self, key: StorageKey) {
        self.area(key).remove(key.as_str());
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("⚠️ [STORAGE] '{}' is not valid JSON: {}", key.as_str(), e);
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
            key: key.as_str().to_string(),
            reason: e.to_string(),
        })?;
        self.area(key).set(key.as_str(), &json)
    }

    pub fn token(&self) -> Option<String> {
        self.get(StorageKey::Token)
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}
