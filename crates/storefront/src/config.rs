//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPSTAND_ADMIN_SECRET` - Shared secret gating order administration
//!
//! ## Optional
//! - `SHOPSTAND_DATA_DIR` - Directory for persisted records (default: `.shopstand`)
//! - `SHOPSTAND_ANALYTICS` - `on`/`off` toggle for the analytics sink (default: `on`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the admin secret.
#[derive(Clone)]
pub struct StoreConfig {
    /// Directory holding the persisted `cart`/`orders` records.
    pub data_dir: PathBuf,
    /// Shared secret for the admin gate. A placeholder access-control
    /// mechanism, not a security boundary.
    pub admin_secret: SecretString,
    /// Whether user actions are reported to the analytics sink.
    pub analytics_enabled: bool,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .field("admin_secret", &"[REDACTED]")
            .field("analytics_enabled", &self.analytics_enabled)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("SHOPSTAND_DATA_DIR", ".shopstand"));
        let admin_secret = SecretString::from(get_required_env("SHOPSTAND_ADMIN_SECRET")?);
        let analytics_enabled = parse_toggle("SHOPSTAND_ANALYTICS", true)?;

        Ok(Self {
            data_dir,
            admin_secret,
            analytics_enabled,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an `on`/`off` style toggle.
fn parse_toggle(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.to_lowercase().as_str() {
            "on" | "true" | "1" => Ok(true),
            "off" | "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected on/off, got {other}"),
            )),
        },
    }
}
