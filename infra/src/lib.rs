//! Infrastructure layer for the OTP login service
//!
//! Provides the durable implementation of the core's `StateStore` seam:
//! a flat JSON file written as a full-snapshot overwrite.

pub mod storage;

pub use storage::JsonFileStore;
