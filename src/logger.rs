//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_instead_of_panicking() {
        let _ = init("info");
        match init("debug") {
            Err(AppError::Logger(msg)) => assert!(msg.contains("set subscriber")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
