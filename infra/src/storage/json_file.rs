//! Flat-file JSON implementation of the durable state store
//!
//! The record set lives in one JSON file: an array of per-user records
//! (phone, current code, expiry, last send time, day marker, send count,
//! login flag). Every save overwrites the full snapshot; the file is never
//! appended to.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;

use otp_core::domain::entities::UserOtpState;
use otp_core::errors::StorageError;
use otp_core::repositories::StateStore;

/// JSON file backed [`StateStore`]
///
/// Missing file on load means an empty store, not an error. An existing
/// but unparseable file is quarantined by renaming it to
/// `<path>.corrupt-<timestamp>` so nothing is silently discarded, and the
/// load proceeds with an empty set. Saves go through a temporary file
/// followed by a rename, so a crash mid-write never leaves a torn
/// snapshot behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unparseable file aside and log where it went
    async fn quarantine(&self) -> PathBuf {
        let quarantined = PathBuf::from(format!(
            "{}.corrupt-{}",
            self.path.display(),
            Utc::now().format("%Y%m%dT%H%M%S")
        ));
        match tokio::fs::rename(&self.path, &quarantined).await {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                quarantined = %quarantined.display(),
                event = "store_file_quarantined",
                "Store file is unparseable; quarantined and starting empty"
            ),
            Err(error) => tracing::error!(
                path = %self.path.display(),
                error = %error,
                event = "store_quarantine_failed",
                "Failed to quarantine corrupt store file; starting empty anyway"
            ),
        }
        quarantined
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<UserOtpState>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // First run: no file yet
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(error) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: error,
                });
            }
        };

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Vec<UserOtpState>>(&bytes) {
            Ok(states) => Ok(states),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    event = "store_file_corrupt",
                    "Failed to parse store file"
                );
                self.quarantine().await;
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, states: &[UserOtpState]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(states).map_err(|error| StorageError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, error),
        })?;

        let tmp = PathBuf::from(format!("{}.tmp", self.path.display()));
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            records = states.len(),
            event = "store_saved",
            "Wrote store snapshot"
        );
        Ok(())
    }
}
