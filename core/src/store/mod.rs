//! The user store owning the phone-to-state map
//!
//! One store exists per process; transports share it through `Arc`. All
//! mutation goes through [`UserStore::update`], which holds the map lock
//! across the caller's check-and-act closure and the snapshot write, so
//! concurrent send/verify races for one phone number cannot interleave.
//! Serializing cross-user operations behind the same lock is acceptable
//! here: the store is one flat resource and every operation is short.

use std::collections::HashMap;

use tokio::sync::Mutex;

use otp_shared::phone::mask_phone;

use crate::domain::entities::UserOtpState;
use crate::errors::{DomainResult, StorageError};
use crate::repositories::StateStore;

/// In-memory map of per-user OTP state, persisted through a [`StateStore`]
pub struct UserStore<S: StateStore> {
    users: Mutex<HashMap<String, UserOtpState>>,
    backend: S,
}

impl<S: StateStore> UserStore<S> {
    /// Create an empty store over the given backend
    pub fn new(backend: S) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            backend,
        }
    }

    /// Replace the in-memory map with the backend's records
    ///
    /// Called once at startup. Returns the number of records loaded.
    pub async fn load(&self) -> Result<usize, StorageError> {
        let records = self.backend.load_all().await?;
        let mut users = self.users.lock().await;
        users.clear();
        for record in records {
            users.insert(record.phone.clone(), record);
        }
        Ok(users.len())
    }

    /// Return the state for a phone number, creating a zero-valued one on
    /// first lookup
    ///
    /// Idempotent: repeated calls for the same phone return the same
    /// logical state. Never fails.
    pub async fn get_or_create(&self, phone: &str) -> UserOtpState {
        let mut users = self.users.lock().await;
        users
            .entry(phone.to_string())
            .or_insert_with(|| UserOtpState::new(phone))
            .clone()
    }

    /// Apply a mutation to one user's state and persist the result
    ///
    /// The closure runs with the map lock held, making the whole
    /// check-and-act sequence atomic per phone number. When the closure
    /// succeeds, the full snapshot is written through the backend; a write
    /// failure is reported to the operator but does not fail the operation,
    /// because the in-memory state stays authoritative for the rest of the
    /// process lifetime.
    pub async fn update<T, F>(&self, phone: &str, f: F) -> DomainResult<T>
    where
        F: FnOnce(&mut UserOtpState) -> DomainResult<T>,
    {
        let mut users = self.users.lock().await;
        let state = users
            .entry(phone.to_string())
            .or_insert_with(|| UserOtpState::new(phone));

        let result = f(state)?;

        let snapshot: Vec<UserOtpState> = users.values().cloned().collect();
        if let Err(error) = self.backend.save_all(&snapshot).await {
            tracing::error!(
                phone = %mask_phone(phone),
                error = %error,
                event = "store_save_failed",
                "Failed to persist user states; in-memory state remains authoritative"
            );
        }

        Ok(result)
    }

    /// Write a full snapshot of the current states
    ///
    /// Called at shutdown so the durable record reflects the final state.
    pub async fn persist(&self) -> Result<(), StorageError> {
        let users = self.users.lock().await;
        let snapshot: Vec<UserOtpState> = users.values().cloned().collect();
        self.backend.save_all(&snapshot).await
    }

    /// Number of known users
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    /// Whether no users are known
    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}
