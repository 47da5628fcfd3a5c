//! Error types for the OTP login domain

pub mod domain_error;

pub use domain_error::{
    AuthError, DomainError, DomainResult, RateLimitReason, StorageError,
};
