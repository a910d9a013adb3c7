//! GeoPulse Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for GeoPulse.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod countries;
pub mod enrich;
pub mod errors;
pub mod refresh;
pub mod summary;

// Re-export common types
pub use countries::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
