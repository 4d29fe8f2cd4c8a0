//! Error types for the subscriber store, the inference proxy and start-up.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the subscriber backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not hold a JSON array of strings: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode subscriber list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed email address: {0:?}")]
    InvalidAddress(String),
}

/// Failures of a single call to the generative-text API.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("GEMINI_API_KEY is not set")]
    Configuration,

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("upstream response carried no text part")]
    EmptyResponse,

    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Start-up errors; any of these stops the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("locale error: {0}")]
    Locale(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_display_carries_status_and_body() {
        let e = ProxyError::Upstream {
            status: 503,
            body: "overloaded".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("overloaded"));
    }

    #[test]
    fn store_io_error_names_the_file() {
        let e = StoreError::Io {
            path: PathBuf::from("/srv/emails.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/srv/emails.json"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
    }
}
