//! Session store trait defining the interface for session-record persistence.

use async_trait::async_trait;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

/// Repository trait for SessionRecord persistence operations.
///
/// This trait defines the contract for the durable side of the session
/// protocol. Implementations must provide a conditional update so that two
/// concurrent rotations of the same refresh secret cannot both succeed.
///
/// # Security Considerations
/// - Refresh secrets are hashed by the service layer before they reach this
///   trait; implementations only ever see SHA-256 digests.
/// - Records are never deleted here; expiry of the refresh secret is what
///   retires a session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Find a session record by its identity.
    ///
    /// # Returns
    /// * `Ok(Some(SessionRecord))` - Record found
    /// * `Ok(None)` - No record for this identity
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>, DomainError>;

    /// Find a session record by the hash of its active refresh secret.
    ///
    /// # Returns
    /// * `Ok(Some(SessionRecord))` - A record currently holds this secret
    /// * `Ok(None)` - Secret is unknown or already rotated away
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_secret_hash(
        &self,
        secret_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError>;

    /// Persist a brand-new session record.
    ///
    /// # Returns
    /// * `Ok(SessionRecord)` - The stored record
    /// * `Err(DomainError)` - Save failed (e.g. the identity already exists)
    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError>;

    /// Replace a session record, but only if its stored secret hash still
    /// matches `expected_secret_hash` at the moment of the write.
    ///
    /// This is the compare-and-swap that keeps concurrent rotations honest:
    /// of two rotations presenting the same secret, exactly one observes a
    /// match and wins; the other sees `Ok(false)`.
    ///
    /// # Returns
    /// * `Ok(true)` - The swap won; the record now holds `record`'s values
    /// * `Ok(false)` - The stored secret no longer matches; nothing written
    /// * `Err(DomainError)` - Store error occurred
    async fn update_if_secret_matches(
        &self,
        expected_secret_hash: &str,
        record: &SessionRecord,
    ) -> Result<bool, DomainError>;
}
