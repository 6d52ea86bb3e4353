//! # SessionGate Core
//!
//! Core session-protocol logic and domain layer for the SessionGate backend.
//! This crate contains domain entities, the token issuance/rotation/verification
//! services, capability traits for the durable session store and the version
//! cache, and the error types shared across the application layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
