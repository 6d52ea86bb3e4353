//! Token service module for the session protocol
//!
//! This module handles all token-related operations:
//! - Pure bearer-token signing and verification
//! - Issuance (login) with write-through to the version cache
//! - Refresh-secret rotation with compare-and-swap on the durable store
//! - Edge verification against the version cache only

mod config;
mod issuer;
mod rotator;
mod signer;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::TokenConfig;
pub use issuer::TokenIssuer;
pub use rotator::RefreshRotator;
pub use signer::TokenSigner;
pub use verifier::TokenVerifier;
