use std::env;
use std::fs;
use std::path::Path;

/// Keys read by `AppConfig::from_env` through `option_env!`.
const CONFIG_KEYS: &[&str] = &[
    "BACKEND_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "LOG_LEVEL",
    "REQUEST_TIMEOUT_MS",
    "MESSAGE_AUTO_CLEAR_MS",
    "MIN_PASSWORD_LENGTH",
    "REDIRECT_POLICY",
    "ACCOUNT_UPDATE_ROUTE",
    "QR_SERVICE_URL",
    "CURRENCY_SYMBOL",
    "VEHICLE_PRICE_PREFIX",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"').trim_matches('\'');

        if !CONFIG_KEYS.contains(&key) {
            println!("cargo:warning=Ignoring unknown key in .env: {}", key);
            continue;
        }

        // The process environment wins over .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
