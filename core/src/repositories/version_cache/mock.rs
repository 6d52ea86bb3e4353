//! In-memory implementation of VersionCache for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, SessionError};

use super::trait_::VersionCache;

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory version cache for tests.
///
/// Supports forced eviction and failure injection so the fail-closed
/// behavior of issuance and verification can be exercised without Redis.
pub struct InMemoryVersionCache {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryVersionCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Drop the entry for an identity, simulating TTL expiry or eviction
    pub async fn evict(&self, identity: &str) {
        self.entries.write().await.remove(identity);
    }

    /// Make subsequent writes fail with a cache error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent reads fail with a cache error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryVersionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionCache for InMemoryVersionCache {
    async fn set_version(
        &self,
        identity: &str,
        version: i64,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::CacheUnavailable {
                message: "injected write failure".to_string(),
            }
            .into());
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            identity.to_string(),
            Entry {
                value: version.to_string(),
                expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
            },
        );
        Ok(())
    }

    async fn get_version(&self, identity: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SessionError::CacheUnavailable {
                message: "injected read failure".to_string(),
            }
            .into());
        }

        let entries = self.entries.read().await;
        Ok(entries
            .get(identity)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip_is_decimal() {
        let cache = InMemoryVersionCache::new();
        cache.set_version("id-1", 42, 60).await.unwrap();

        assert_eq!(
            cache.get_version("id-1").await.unwrap(),
            Some("42".to_string())
        );
        assert_eq!(cache.get_version("id-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_eviction_reads_as_absent() {
        let cache = InMemoryVersionCache::new();
        cache.set_version("id-1", 1, 60).await.unwrap();
        cache.evict("id-1").await;

        assert_eq!(cache.get_version("id-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let cache = InMemoryVersionCache::new();
        cache.set_version("id-1", 1, 0).await.unwrap();

        assert_eq!(cache.get_version("id-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let cache = InMemoryVersionCache::new();
        cache.fail_writes(true);
        assert!(cache.set_version("id-1", 1, 60).await.is_err());

        cache.fail_writes(false);
        cache.set_version("id-1", 1, 60).await.unwrap();

        cache.fail_reads(true);
        assert!(cache.get_version("id-1").await.is_err());
    }
}
