//! Storefront widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FUNKY_STORAGE_DIR` - Directory for the file-backed store (in-memory if unset)
//! - `FUNKY_SESSION_KEY` - Storage key for the session record (default: `funky_auth`)
//! - `FUNKY_CART_KEY` - Storage key for the cart items (default: `funky_cart`)
//! - `FUNKY_CURRENCY` - ISO 4217 code used for prices (default: INR)
//! - `FUNKY_PLACEHOLDER_IMAGE` - Image used for product cards without one
//! - `FUNKY_LOGIN_POPUP_DELAY_MS` - Delay before the login popup opens (default: 1000)
//! - `FUNKY_NOTIFICATION_TIMEOUT_MS` - How long notices stay visible (default: 3000)
//! - `FUNKY_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;
use std::time::Duration;

use funky_teens_core::CurrencyCode;
use thiserror::Error;

use crate::models::keys;

const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";
const DEFAULT_LOGIN_POPUP_DELAY_MS: u64 = 1000;
const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Storefront widget configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store; `None` keeps state in memory
    pub storage_dir: Option<PathBuf>,
    /// Storage key for the session record
    pub session_key: String,
    /// Storage key for the cart item list
    pub cart_key: String,
    /// Currency all prices are shown in
    pub currency: CurrencyCode,
    /// Image URL used when a product card has none
    pub placeholder_image: String,
    /// Delay before the login popup opens on the home page and after logout
    pub login_popup_delay: Duration,
    /// How long a notification toast stays on screen
    pub notification_timeout: Duration,
    /// Log line format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            session_key: keys::SESSION.to_string(),
            cart_key: keys::CART.to_string(),
            currency: CurrencyCode::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            login_popup_delay: Duration::from_millis(DEFAULT_LOGIN_POPUP_DELAY_MS),
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let currency = get_env_or_default("FUNKY_CURRENCY", "INR")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("FUNKY_CURRENCY".to_string(), e.to_string()))?;

        let login_popup_delay =
            get_millis("FUNKY_LOGIN_POPUP_DELAY_MS", DEFAULT_LOGIN_POPUP_DELAY_MS)?;
        let notification_timeout = get_millis(
            "FUNKY_NOTIFICATION_TIMEOUT_MS",
            DEFAULT_NOTIFICATION_TIMEOUT_MS,
        )?;
        let log_format = parse_log_format(&get_env_or_default("FUNKY_LOG_FORMAT", "text"))?;

        Ok(Self {
            storage_dir: get_optional_env("FUNKY_STORAGE_DIR").map(PathBuf::from),
            session_key: get_env_or_default("FUNKY_SESSION_KEY", keys::SESSION),
            cart_key: get_env_or_default("FUNKY_CART_KEY", keys::CART),
            currency,
            placeholder_image: get_env_or_default(
                "FUNKY_PLACEHOLDER_IMAGE",
                DEFAULT_PLACEHOLDER_IMAGE,
            ),
            login_popup_delay,
            notification_timeout,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a millisecond duration from the environment.
fn get_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(Duration::from_millis(default));
    };
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" | "pretty" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar(
            "FUNKY_LOG_FORMAT".to_string(),
            format!("expected 'text' or 'json', got '{other}'"),
        )),
    }
}
