//! In-memory implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

use super::trait_::SessionStore;

/// In-memory session store for tests, keyed by identity.
///
/// The write lock is held across the check-and-swap in
/// `update_if_secret_matches`, so races between concurrent rotations resolve
/// exactly like they do against a conditional UPDATE.
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a record directly, bypassing the service layer
    pub async fn insert(&self, record: SessionRecord) {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record);
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn find_by_secret_hash(
        &self,
        secret_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.refresh_secret_hash == secret_hash)
            .cloned())
    }

    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id) {
            return Err(DomainError::Internal {
                message: format!("session already exists for identity {}", record.id),
            });
        }

        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_if_secret_matches(
        &self,
        expected_secret_hash: &str,
        record: &SessionRecord,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.id) {
            Some(stored) if stored.refresh_secret_hash == expected_secret_hash => {
                records.insert(record.id.clone(), record.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(id: &str, hash: &str) -> SessionRecord {
        SessionRecord::new(id, hash.to_string(), Utc::now() + Duration::days(7))
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = InMemorySessionStore::new();
        store.create(record("id-1", "hash-1")).await.unwrap();

        let by_id = store.find_by_id("id-1").await.unwrap().unwrap();
        assert_eq!(by_id.refresh_secret_hash, "hash-1");

        let by_hash = store.find_by_secret_hash("hash-1").await.unwrap().unwrap();
        assert_eq!(by_hash.id, "id-1");

        assert!(store.find_by_secret_hash("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let store = InMemorySessionStore::new();
        store.create(record("id-1", "hash-1")).await.unwrap();

        assert!(store.create(record("id-1", "hash-2")).await.is_err());
    }

    #[tokio::test]
    async fn test_conditional_update_wins_once() {
        let store = InMemorySessionStore::new();
        let original = record("id-1", "hash-1");
        store.create(original.clone()).await.unwrap();

        let first = original.rotated("hash-2".to_string(), original.refresh_expires_at);
        let second = original.rotated("hash-3".to_string(), original.refresh_expires_at);

        assert!(store
            .update_if_secret_matches("hash-1", &first)
            .await
            .unwrap());
        // The second swap still expects the original secret and must lose
        assert!(!store
            .update_if_secret_matches("hash-1", &second)
            .await
            .unwrap());

        let stored = store.find_by_id("id-1").await.unwrap().unwrap();
        assert_eq!(stored.refresh_secret_hash, "hash-2");
        assert_eq!(stored.token_version, 2);
    }
}
