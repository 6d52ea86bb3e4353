//! Session record entity backing the refresh-secret rotation protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable session record, one per identity.
///
/// The record holds the single live refresh secret (hashed at rest) and the
/// monotonic token version for its identity. Every issuance event replaces
/// the secret, the expiry, and the version in place; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Stable external identity string (primary key)
    pub id: String,

    /// SHA-256 hex digest of the active refresh secret
    pub refresh_secret_hash: String,

    /// Timestamp after which the refresh secret is no longer exchangeable
    pub refresh_expires_at: DateTime<Utc>,

    /// Monotonic version; starts at 1 and increases on every issuance event
    pub token_version: i64,

    /// Timestamp of first creation
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a fresh record for a first login, at version 1.
    pub fn new(
        id: impl Into<String>,
        refresh_secret_hash: String,
        refresh_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            refresh_secret_hash,
            refresh_expires_at,
            token_version: 1,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the refresh secret has expired.
    pub fn is_refresh_expired(&self) -> bool {
        Utc::now() >= self.refresh_expires_at
    }

    /// Returns a copy of this record with a replacement secret hash and
    /// expiry, and the version bumped by one.
    pub fn rotated(
        &self,
        refresh_secret_hash: String,
        refresh_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            refresh_secret_hash,
            refresh_expires_at,
            token_version: self.token_version + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_record_starts_at_version_one() {
        let expires = Utc::now() + Duration::days(7);
        let record = SessionRecord::new("user-77001", "hash".to_string(), expires);

        assert_eq!(record.id, "user-77001");
        assert_eq!(record.token_version, 1);
        assert!(!record.is_refresh_expired());
    }

    #[test]
    fn test_rotated_bumps_version_and_replaces_secret() {
        let expires = Utc::now() + Duration::days(7);
        let record = SessionRecord::new("id-1", "old-hash".to_string(), expires);

        let new_expires = Utc::now() + Duration::days(7);
        let rotated = record.rotated("new-hash".to_string(), new_expires);

        assert_eq!(rotated.token_version, 2);
        assert_eq!(rotated.refresh_secret_hash, "new-hash");
        assert_eq!(rotated.id, record.id);
        assert_eq!(rotated.created_at, record.created_at);
    }

    #[test]
    fn test_expired_record() {
        let record = SessionRecord::new(
            "id-1",
            "hash".to_string(),
            Utc::now() - Duration::seconds(1),
        );

        assert!(record.is_refresh_expired());
    }
}
