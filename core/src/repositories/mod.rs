//! Persistence seams for the domain layer
//!
//! The durable store is abstracted behind [`StateStore`] so the core stays
//! free of file-system concerns; `otp_infra` provides the flat-file
//! implementation and [`MemoryStateStore`] backs tests.

pub mod mock;
pub mod state_store;

pub use mock::MemoryStateStore;
pub use state_store::StateStore;
