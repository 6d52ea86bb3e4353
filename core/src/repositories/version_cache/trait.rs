//! Version cache trait defining the fast-path lookup for token verification.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Cache trait for the per-identity token version.
///
/// Entries are written through on every issuance event and otherwise left to
/// expire; the protocol never deletes them. An absent entry is a meaningful
/// state ("no verifiable session"), not an error.
#[async_trait]
pub trait VersionCache: Send + Sync {
    /// Store the current token version for an identity with a TTL.
    ///
    /// The value is stored as the canonical decimal rendering of `version`.
    async fn set_version(
        &self,
        identity: &str,
        version: i64,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    /// Fetch the cached token version for an identity.
    ///
    /// # Returns
    /// * `Ok(Some(String))` - Cached decimal version string
    /// * `Ok(None)` - No entry (never written, or expired)
    /// * `Err(DomainError)` - Cache error occurred
    async fn get_version(&self, identity: &str) -> Result<Option<String>, DomainError>;
}
