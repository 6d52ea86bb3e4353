//! Refresh-secret rotation.

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::errors::{DomainError, SessionError};
use crate::repositories::{SessionStore, VersionCache};

use super::issuer::{hash_secret, TokenIssuer};

/// Exchanges a presented refresh secret for a fresh token pair.
///
/// Rotation is single-use: the durable update is a compare-and-swap keyed on
/// the presented secret, so of two concurrent rotations exactly one wins and
/// the other observes `RefreshConflict`.
pub struct RefreshRotator<S: SessionStore, C: VersionCache> {
    store: Arc<S>,
    issuer: TokenIssuer<S, C>,
}

impl<S: SessionStore, C: VersionCache> RefreshRotator<S, C> {
    /// Creates a new rotator over the injected store and issuer.
    pub fn new(store: Arc<S>, issuer: TokenIssuer<S, C>) -> Self {
        Self { store, issuer }
    }

    /// Rotates a refresh secret.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New bearer token (version bumped) and new secret
    /// * `Err(SessionError::RefreshTokenInvalid)` - Unknown or already rotated secret
    /// * `Err(SessionError::RefreshTokenExpired)` - Secret past its expiry
    /// * `Err(SessionError::RefreshConflict)` - Lost against a concurrent rotation
    /// * `Err(SessionError::StoreInconsistent)` - Durable record advanced but the
    ///   cache write failed; retry to resynchronize
    pub async fn rotate(&self, presented_secret: &str) -> Result<TokenPair, DomainError> {
        let presented_hash = hash_secret(presented_secret);

        let record = self
            .store
            .find_by_secret_hash(&presented_hash)
            .await?
            .ok_or(SessionError::RefreshTokenInvalid)?;

        if record.is_refresh_expired() {
            tracing::debug!(identity = %record.id, "rejected expired refresh secret");
            return Err(SessionError::RefreshTokenExpired.into());
        }

        let credentials = self.issuer.mint_refresh_credentials();
        let rotated = record.rotated(credentials.secret_hash, credentials.expires_at);

        let swapped = self
            .store
            .update_if_secret_matches(&presented_hash, &rotated)
            .await?;
        if !swapped {
            tracing::debug!(identity = %record.id, "refresh lost a concurrent rotation");
            return Err(SessionError::RefreshConflict.into());
        }

        let access_token = self
            .issuer
            .issue_for_existing_version(&rotated.id, rotated.token_version)
            .await?;

        tracing::info!(
            identity = %rotated.id,
            version = rotated.token_version,
            "rotated refresh secret"
        );

        let config = self.issuer.config();
        Ok(TokenPair::new(
            access_token,
            credentials.secret,
            config.access_token_lifetime,
            config.refresh_secret_lifetime,
        ))
    }
}

impl<S: SessionStore, C: VersionCache> Clone for RefreshRotator<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            issuer: self.issuer.clone(),
        }
    }
}
