//! In-memory state store for tests and local development

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entities::UserOtpState;
use crate::errors::StorageError;
use crate::repositories::StateStore;

/// In-memory [`StateStore`] implementation
///
/// Holds the last saved snapshot and can be switched into a failing mode
/// to exercise write-failure handling.
#[derive(Default)]
pub struct MemoryStateStore {
    records: Mutex<Vec<UserOtpState>>,
    fail_saves: AtomicBool,
    save_count: Mutex<u32>,
}

impl MemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<UserOtpState>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent `save_all` calls fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `save_all` calls so far
    pub fn save_count(&self) -> u32 {
        *self.save_count.lock().unwrap()
    }

    /// The last saved snapshot
    pub fn records(&self) -> Vec<UserOtpState> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load_all(&self) -> Result<Vec<UserOtpState>, StorageError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save_all(&self, states: &[UserOtpState]) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: "<memory>".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "simulated failure"),
            });
        }
        *self.records.lock().unwrap() = states.to_vec();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
