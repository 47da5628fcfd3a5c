//! Core business logic and domain layer for the OTP login service
//!
//! This crate contains the OTP lifecycle state machine and the pieces it
//! operates on:
//! - `domain` - the per-user OTP state entity
//! - `engine` - pure state-transition logic (eligibility, issuance, verify)
//! - `store` - the user store owning the phone-to-state map
//! - `repositories` - the durable `StateStore` seam and an in-memory mock
//! - `services` - the `AuthService` boundary called by the transports
//! - `errors` - domain error types

pub mod domain;
pub mod engine;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod store;

// Re-export the main entry points at crate root
pub use domain::entities::UserOtpState;
pub use engine::{OtpEngine, SendEligibility};
pub use errors::{AuthError, DomainError, DomainResult, RateLimitReason, StorageError};
pub use repositories::{MemoryStateStore, StateStore};
pub use services::auth::{AuthService, IssuedCode};
pub use store::UserStore;
