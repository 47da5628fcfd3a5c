//! Configuration module
//!
//! Configuration is split into two areas:
//! - `otp` - OTP lifecycle parameters (cooldown, daily quota, expiry)
//! - `server` - HTTP server binding and durable store location

pub mod otp;
pub mod server;

pub use otp::OtpConfig;
pub use server::ServerConfig;
