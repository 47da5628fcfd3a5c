//! Domain layer containing entities

pub mod entities;
