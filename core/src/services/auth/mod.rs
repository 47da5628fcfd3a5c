//! Authentication service boundary

pub mod service;

pub use service::{AuthService, IssuedCode};
