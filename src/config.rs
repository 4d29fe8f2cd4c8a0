//! Process configuration, read once from the environment at start.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Upstream generative-text API settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// `None` disables the proxy; every call then fails without network access.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Bound on one upstream round-trip.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Public host name, used for the startup banner and the CORS origin.
    pub domain: String,
    pub emails_file: PathBuf,
    pub locales_dir: PathBuf,
    pub log_level: String,
    pub gemini: GeminiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("invalid PORT '{raw}': {e}")))?,
            None => 3000,
        };

        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(AppError::Config(
                        "GEMINI_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(AppError::Config(format!(
                        "invalid GEMINI_TIMEOUT_SECS '{raw}': {e}"
                    )));
                }
            },
            None => 30,
        };

        Ok(Self {
            port,
            domain: get("DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            emails_file: get("EMAILS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("emails.json")),
            locales_dir: get("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("locales")),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                api_base: get("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
