//! Service layer

pub mod auth;
