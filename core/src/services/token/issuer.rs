//! Token issuance: login, post-rotation signing, and forced revocation.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, SessionError};
use crate::repositories::{SessionStore, VersionCache};

use super::config::TokenConfig;
use super::signer::TokenSigner;

/// Number of random bytes in a refresh secret (512 bits)
const REFRESH_SECRET_BYTES: usize = 64;

/// Freshly minted refresh credentials. The raw secret leaves this struct
/// exactly once, inside the token pair handed back to the client.
pub(crate) struct RefreshCredentials {
    pub secret: String,
    pub secret_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Service minting (bearer token, refresh secret) pairs.
///
/// An issuance event is complete only when both the durable record and the
/// version cache carry the new version; a failed cache write fails the whole
/// call so no client ever holds a token the edge cannot verify.
pub struct TokenIssuer<S: SessionStore, C: VersionCache> {
    store: Arc<S>,
    cache: Arc<C>,
    signer: Arc<TokenSigner>,
    config: TokenConfig,
}

impl<S: SessionStore, C: VersionCache> TokenIssuer<S, C> {
    /// Creates a new issuer over the injected store, cache, and signer.
    pub fn new(
        store: Arc<S>,
        cache: Arc<C>,
        signer: Arc<TokenSigner>,
        config: TokenConfig,
    ) -> Self {
        Self {
            store,
            cache,
            signer,
            config,
        }
    }

    /// The configuration this issuer operates under.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issues a token pair for an identity asserted by the upstream login.
    ///
    /// First login creates the record at version 1. A repeat login rotates
    /// the stored secret in place and bumps the version, which instantly
    /// invalidates every previously issued bearer token and orphans the old
    /// refresh secret: one live session per identity.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Bearer token plus the new refresh secret
    /// * `Err(DomainError)` - Store or cache write failed; nothing is issued
    pub async fn login(&self, identity: &str) -> Result<TokenPair, DomainError> {
        let credentials = self.mint_refresh_credentials();

        let version = match self.store.find_by_id(identity).await? {
            None => {
                let record = SessionRecord::new(
                    identity,
                    credentials.secret_hash.clone(),
                    credentials.expires_at,
                );
                self.store.create(record).await?;
                1
            }
            Some(existing) => {
                let rotated = existing.rotated(
                    credentials.secret_hash.clone(),
                    credentials.expires_at,
                );
                let swapped = self
                    .store
                    .update_if_secret_matches(&existing.refresh_secret_hash, &rotated)
                    .await?;
                if !swapped {
                    // Lost against a concurrent rotation; the client retries
                    return Err(SessionError::RefreshConflict.into());
                }
                rotated.token_version
            }
        };

        self.write_version(identity, version).await?;

        let access_token = self.sign_access_token(identity, version)?;
        tracing::info!(identity, version, "issued session");

        Ok(self.token_pair(access_token, credentials.secret))
    }

    /// Signs a bearer token for a version the rotator has already committed
    /// to the durable store, after writing that version through to the cache.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Signed bearer token carrying `version`
    /// * `Err(DomainError)` - `StoreInconsistent` when the cache write fails:
    ///   the durable record has advanced and the caller must retry so the
    ///   cache catches up
    pub async fn issue_for_existing_version(
        &self,
        identity: &str,
        version: i64,
    ) -> Result<String, DomainError> {
        self.write_version(identity, version)
            .await
            .map_err(|err| match err {
                DomainError::Session(SessionError::CacheUnavailable { message }) => {
                    tracing::error!(
                        identity,
                        version,
                        "cache write failed after durable commit: {}",
                        message
                    );
                    SessionError::StoreInconsistent.into()
                }
                other => other,
            })?;

        self.sign_access_token(identity, version)
    }

    /// Administrative forced logout: bumps the stored version and replaces
    /// the refresh secret with an orphan value that is never handed out.
    ///
    /// Outstanding bearer tokens die on their next verification and the old
    /// refresh secret stops matching, so the identity must authenticate from
    /// scratch.
    pub async fn revoke(&self, identity: &str) -> Result<(), DomainError> {
        let record =
            self.store
                .find_by_id(identity)
                .await?
                .ok_or_else(|| DomainError::NotFound {
                    resource: format!("session for identity {}", identity),
                })?;

        let orphan = self.mint_refresh_credentials();
        let bumped = record.rotated(orphan.secret_hash, record.refresh_expires_at);

        let swapped = self
            .store
            .update_if_secret_matches(&record.refresh_secret_hash, &bumped)
            .await?;
        if !swapped {
            return Err(SessionError::RefreshConflict.into());
        }

        self.write_version(identity, bumped.token_version)
            .await
            .map_err(|err| match err {
                DomainError::Session(SessionError::CacheUnavailable { .. }) => {
                    SessionError::StoreInconsistent.into()
                }
                other => other,
            })?;

        tracing::info!(identity, version = bumped.token_version, "revoked sessions");
        Ok(())
    }

    /// Generates a fresh refresh secret with its storage hash and expiry.
    pub(crate) fn mint_refresh_credentials(&self) -> RefreshCredentials {
        let secret = generate_refresh_secret();
        let secret_hash = hash_secret(&secret);
        let expires_at = Utc::now() + Duration::seconds(self.config.refresh_secret_lifetime);

        RefreshCredentials {
            secret,
            secret_hash,
            expires_at,
        }
    }

    /// Write-through of the version cache entry, TTL = refresh lifetime.
    async fn write_version(&self, identity: &str, version: i64) -> Result<(), DomainError> {
        self.cache
            .set_version(
                identity,
                version,
                self.config.refresh_secret_lifetime.max(0) as u64,
            )
            .await
    }

    fn sign_access_token(&self, identity: &str, version: i64) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(identity.to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.access_token_lifetime)).timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            jti: Uuid::new_v4().to_string(),
            ver: Some(version.to_string()),
        };

        self.signer.sign(&claims)
    }

    fn token_pair(&self, access_token: String, refresh_secret: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_secret,
            self.config.access_token_lifetime,
            self.config.refresh_secret_lifetime,
        )
    }
}

impl<S: SessionStore, C: VersionCache> Clone for TokenIssuer<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            signer: Arc::clone(&self.signer),
            config: self.config.clone(),
        }
    }
}

/// Generates a refresh secret: 64 cryptographically random bytes,
/// standard-base64 encoded.
pub(crate) fn generate_refresh_secret() -> String {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE64.encode(bytes)
}

/// Hashes a refresh secret for storage.
pub(crate) fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
