//! Durable state store trait

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::UserOtpState;
use crate::errors::StorageError;

/// Durable storage for the full set of per-user OTP states
///
/// The store is a single flat resource written as a full-snapshot
/// overwrite, not an append log. Implementations must treat an absent
/// backing resource as an empty set and must quarantine (not discard) an
/// unparseable one.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the complete record set
    ///
    /// An absent backing resource yields an empty vector. A present but
    /// unparseable resource is preserved by renaming and also yields an
    /// empty vector; neither case is an error.
    async fn load_all(&self) -> Result<Vec<UserOtpState>, StorageError>;

    /// Overwrite the durable record set with the given states
    async fn save_all(&self, states: &[UserOtpState]) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    async fn load_all(&self) -> Result<Vec<UserOtpState>, StorageError> {
        (**self).load_all().await
    }

    async fn save_all(&self, states: &[UserOtpState]) -> Result<(), StorageError> {
        (**self).save_all(states).await
    }
}
