//! Shared utilities and common types for the OTP login service
//!
//! This crate provides common functionality used across the server crates:
//! - Configuration types
//! - Phone number validation utilities
//! - Common API response wrappers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{OtpConfig, ServerConfig};
pub use types::ApiResponse;
pub use utils::phone;
