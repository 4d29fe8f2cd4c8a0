//! Subscriber list persistence.
//!
//! The list is a JSON array of address strings, rewritten whole on every
//! successful signup. [`JsonFileStore`] serializes signups through a mutex so
//! two concurrent requests in this process cannot lose each other's write.
//! Several processes sharing one file are not coordinated.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::email::is_valid_address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Append `email` unless an identical string is already recorded.
    ///
    /// Matching is exact and case-sensitive. `AlreadyExists` performs no write.
    async fn add_if_absent(&self, email: &str) -> Result<AddOutcome, StoreError>;

    /// Recorded addresses in signup order.
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Flat-file store, pretty-printed with two-space indentation.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the list, creating an empty file when none exists yet.
    async fn load(&self) -> Result<Vec<String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "creating empty subscriber file");
                self.persist(&[]).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(self.io_err(e)),
        }
    }

    /// Write to a sibling temp file, then rename over the list.
    async fn persist(&self, emails: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(emails).map_err(StoreError::Encode)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await.map_err(|e| self.io_err(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_err(e))
    }
}

#[async_trait]
impl SubscriberStore for JsonFileStore {
    async fn add_if_absent(&self, email: &str) -> Result<AddOutcome, StoreError> {
        if !is_valid_address(email) {
            return Err(StoreError::InvalidAddress(email.to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut emails = self.load().await?;

        if emails.iter().any(|e| e == email) {
            debug!(email, "subscriber already recorded");
            return Ok(AddOutcome::AlreadyExists);
        }

        emails.push(email.to_string());
        self.persist(&emails).await?;
        info!(email_count = emails.len(), "subscriber added");
        Ok(AddOutcome::Added)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}
