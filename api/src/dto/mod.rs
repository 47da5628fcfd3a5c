//! Request and response data transfer objects

pub mod auth;

pub use auth::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
