//! Unit tests for refresh-secret rotation, including the rotation race

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Barrier;

use crate::domain::entities::session::SessionRecord;
use crate::errors::{DomainError, SessionError};
use crate::repositories::{InMemorySessionStore, SessionStore};
use crate::services::token::issuer::hash_secret;
use crate::services::token::{RefreshRotator, TokenIssuer};

use super::harness;

#[tokio::test]
async fn test_rotate_bumps_version_and_returns_new_pair() {
    let h = harness();

    let login = h.issuer.login("id-1").await.unwrap();
    let rotated = h.rotator.rotate(&login.refresh_secret).await.unwrap();

    assert_ne!(rotated.refresh_secret, login.refresh_secret);

    let record = h.store.find_by_id("id-1").await.unwrap().unwrap();
    assert_eq!(record.token_version, 2);
    assert_eq!(
        h.cache.get_version("id-1").await.unwrap(),
        Some("2".to_string())
    );

    let claims = h.signer.verify(&rotated.access_token).unwrap();
    assert_eq!(claims.version().unwrap(), "2");
}

#[tokio::test]
async fn test_rotation_is_single_use() {
    let h = harness();

    let login = h.issuer.login("id-1").await.unwrap();
    h.rotator.rotate(&login.refresh_secret).await.unwrap();

    // Re-submitting the consumed secret finds no matching record
    assert!(matches!(
        h.rotator.rotate(&login.refresh_secret).await,
        Err(DomainError::Session(SessionError::RefreshTokenInvalid))
    ));
}

#[tokio::test]
async fn test_unknown_secret_rejected() {
    let h = harness();

    assert!(matches!(
        h.rotator.rotate("never-issued").await,
        Err(DomainError::Session(SessionError::RefreshTokenInvalid))
    ));
}

#[tokio::test]
async fn test_expired_secret_rejected() {
    let h = harness();

    let secret = "expired-secret-value";
    let record = SessionRecord {
        id: "id-1".to_string(),
        refresh_secret_hash: hash_secret(secret),
        refresh_expires_at: Utc::now() - Duration::seconds(1),
        token_version: 4,
        created_at: Utc::now() - Duration::days(30),
    };
    h.store.insert(record).await;

    assert!(matches!(
        h.rotator.rotate(secret).await,
        Err(DomainError::Session(SessionError::RefreshTokenExpired))
    ));
}

#[tokio::test]
async fn test_cache_failure_after_swap_is_inconsistent() {
    let h = harness();

    let login = h.issuer.login("id-1").await.unwrap();
    h.cache.fail_writes(true);

    assert!(matches!(
        h.rotator.rotate(&login.refresh_secret).await,
        Err(DomainError::Session(SessionError::StoreInconsistent))
    ));

    // The durable record already advanced; only the cache is stale
    let record = h.store.find_by_id("id-1").await.unwrap().unwrap();
    assert_eq!(record.token_version, 2);
    assert_eq!(
        h.cache.get_version("id-1").await.unwrap(),
        Some("1".to_string())
    );
}

/// Store wrapper that holds every secret lookup at a barrier, forcing two
/// rotations to read the same snapshot before either attempts the swap.
struct BarrierStore {
    inner: Arc<InMemorySessionStore>,
    barrier: Barrier,
}

#[async_trait]
impl SessionStore for BarrierStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_secret_hash(
        &self,
        secret_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let found = self.inner.find_by_secret_hash(secret_hash).await;
        self.barrier.wait().await;
        found
    }

    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError> {
        self.inner.create(record).await
    }

    async fn update_if_secret_matches(
        &self,
        expected_secret_hash: &str,
        record: &SessionRecord,
    ) -> Result<bool, DomainError> {
        self.inner
            .update_if_secret_matches(expected_secret_hash, record)
            .await
    }
}

#[tokio::test]
async fn test_concurrent_rotations_win_exactly_once() {
    let h = harness();

    // Reach version 2 the ordinary way
    let login = h.issuer.login("id-1").await.unwrap();
    let current = h.rotator.rotate(&login.refresh_secret).await.unwrap();

    let racing_store = Arc::new(BarrierStore {
        inner: Arc::clone(&h.store),
        barrier: Barrier::new(2),
    });
    let racing_issuer = TokenIssuer::new(
        Arc::clone(&racing_store),
        Arc::clone(&h.cache),
        Arc::clone(&h.signer),
        h.config.clone(),
    );
    let racing_rotator = Arc::new(RefreshRotator::new(
        Arc::clone(&racing_store),
        racing_issuer,
    ));

    let first = {
        let rotator = Arc::clone(&racing_rotator);
        let secret = current.refresh_secret.clone();
        tokio::spawn(async move { rotator.rotate(&secret).await })
    };
    let second = {
        let rotator = Arc::clone(&racing_rotator);
        let secret = current.refresh_secret.clone();
        tokio::spawn(async move { rotator.rotate(&secret).await })
    };

    let outcomes = vec![first.await.unwrap(), second.await.unwrap()];

    let winners: Vec<_> = outcomes.iter().filter(|r| r.is_ok()).collect();
    let losers: Vec<_> = outcomes.iter().filter(|r| r.is_err()).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(losers.len(), 1);

    let pair = winners[0].as_ref().unwrap();
    let claims = h.signer.verify(&pair.access_token).unwrap();
    assert_eq!(claims.version().unwrap(), "3");

    assert!(matches!(
        losers[0].as_ref().unwrap_err(),
        DomainError::Session(SessionError::RefreshConflict)
    ));

    // The version advanced exactly once
    let record = h.store.find_by_id("id-1").await.unwrap().unwrap();
    assert_eq!(record.token_version, 3);
    assert_eq!(
        h.cache.get_version("id-1").await.unwrap(),
        Some("3".to_string())
    );
}
