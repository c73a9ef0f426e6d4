// ============================================================================
// CONFIG - Compile-time configuration (build.rs forwards .env)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Where a successful login / 2FA verification lands the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectPolicy {
    /// Fleet managers and admins get their own dashboards.
    RoleBased,
    /// Every role lands on `/dashboard`.
    Dashboard,
}

impl RedirectPolicy {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dashboard" => RedirectPolicy::Dashboard,
            _ => RedirectPolicy::RoleBased,
        }
    }
}

/// Endpoint used by the account editor to save profile changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountUpdateRoute {
    /// `PUT /profile/api/update`
    Put,
    /// `POST /profile/update`
    Post,
}

impl AccountUpdateRoute {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "post" => AccountUpdateRoute::Post,
            _ => AccountUpdateRoute::Put,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for every endpoint. Empty means same-origin.
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub request_timeout_ms: u32,
    pub message_auto_clear_ms: u32,
    pub min_password_length: usize,
    pub redirect_policy: RedirectPolicy,
    pub account_update_route: AccountUpdateRoute,
    pub qr_service_url: String,
    pub currency_symbol: String,
    pub vehicle_price_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            request_timeout_ms: 15_000,
            message_auto_clear_ms: 5_000,
            min_password_length: 6,
            redirect_policy: RedirectPolicy::RoleBased,
            account_update_route: AccountUpdateRoute::Put,
            qr_service_url: "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data="
                .to_string(),
            currency_symbol: "$".to_string(),
            vehicle_price_prefix: "Rs.".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from variables captured at compile time.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: option_env!("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
            request_timeout_ms: option_env!("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            message_auto_clear_ms: option_env!("MESSAGE_AUTO_CLEAR_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.message_auto_clear_ms),
            min_password_length: option_env!("MIN_PASSWORD_LENGTH")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_password_length),
            redirect_policy: option_env!("REDIRECT_POLICY")
                .map(RedirectPolicy::parse)
                .unwrap_or(defaults.redirect_policy),
            account_update_route: option_env!("ACCOUNT_UPDATE_ROUTE")
                .map(AccountUpdateRoute::parse)
                .unwrap_or(defaults.account_update_route),
            qr_service_url: option_env!("QR_SERVICE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.qr_service_url),
            currency_symbol: option_env!("CURRENCY_SYMBOL")
                .map(str::to_string)
                .unwrap_or(defaults.currency_symbol),
            vehicle_price_prefix: option_env!("VEHICLE_PRICE_PREFIX")
                .map(str::to_string)
                .unwrap_or(defaults.vehicle_price_prefix),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Level handed to the logger; `Off` when logging is disabled.
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }

    /// Full URL for an endpoint path.
    pub fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.backend_url, path)
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
