//! HTTP and console transports for the OTP login service
//!
//! Both transports are thin glue over `otp_core::AuthService`: the HTTP
//! layer exposes send-code/verify-code endpoints, the console layer a
//! menu-driven command dispatch decoupled from terminal I/O.

pub mod app;
pub mod console;
pub mod dto;
pub mod handlers;
pub mod routes;
