//! Redis-backed implementation of the VersionCache trait.
//!
//! One entry per identity under `auth:token-version:{identity}`, value the
//! canonical decimal version string, TTL supplied by the caller (the refresh
//! secret lifetime). Entries are only ever overwritten or left to expire.

use async_trait::async_trait;

use sg_core::errors::{DomainError, SessionError};
use sg_core::repositories::VersionCache;

use super::redis_client::RedisClient;

/// Key prefix for token-version entries
const VERSION_KEY_PREFIX: &str = "auth:token-version:";

/// Build the cache key for an identity's token version
pub fn version_key(identity: &str) -> String {
    format!("{}{}", VERSION_KEY_PREFIX, identity)
}

/// Redis-backed version cache
#[derive(Clone)]
pub struct RedisVersionCache {
    client: RedisClient,
}

impl RedisVersionCache {
    /// Create a new version cache over an existing Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VersionCache for RedisVersionCache {
    async fn set_version(
        &self,
        identity: &str,
        version: i64,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.client
            .set_with_expiry(&version_key(identity), &version.to_string(), ttl_seconds)
            .await
            .map_err(|e| {
                SessionError::CacheUnavailable {
                    message: e.to_string(),
                }
                .into()
            })
    }

    async fn get_version(&self, identity: &str) -> Result<Option<String>, DomainError> {
        self.client
            .get(&version_key(identity))
            .await
            .map_err(|e| {
                SessionError::CacheUnavailable {
                    message: e.to_string(),
                }
                .into()
            })
    }
}
