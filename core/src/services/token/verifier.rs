//! Edge verification of bearer tokens against the version cache.

use std::sync::Arc;

use crate::errors::{DomainError, TokenError};
use crate::repositories::VersionCache;

use super::signer::TokenSigner;

/// Accepts or rejects an inbound bearer token.
///
/// The verifier runs at the network edge and reads only the version cache,
/// never the durable store. A token is accepted iff its signature,
/// timestamps, issuer, and audience hold AND its `ver` claim is string-equal
/// to the cached version for its subject. An absent cache entry rejects even
/// when the durable record might still be valid: an evicted or expired entry
/// forces re-authentication rather than falling back to a slower lookup.
///
/// This is what makes revocation instantaneous: bumping the stored and
/// cached version invalidates every token minted against the prior version,
/// independent of each token's own expiry.
pub struct TokenVerifier<C: VersionCache> {
    signer: Arc<TokenSigner>,
    cache: Arc<C>,
}

impl<C: VersionCache> TokenVerifier<C> {
    /// Creates a new verifier over the injected signer and cache.
    pub fn new(signer: Arc<TokenSigner>, cache: Arc<C>) -> Self {
        Self { signer, cache }
    }

    /// Verifies a bearer token and returns the authenticated identity.
    ///
    /// Stateless read with no side effects; verifying the same token twice
    /// yields the same result absent an intervening issuance event.
    pub async fn verify(&self, token: &str) -> Result<String, DomainError> {
        let claims = self.signer.verify(token)?;

        let identity = claims.subject()?.to_string();
        let token_version = claims.version()?;

        // A cache outage is indistinguishable from an absent entry on
        // purpose: reject rather than guess.
        let cached_version = match self.cache.get_version(&identity).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(identity = %identity, "version cache read failed: {}", err);
                None
            }
        };

        match cached_version {
            None => {
                tracing::debug!(identity = %identity, "no cached token version");
                Err(TokenError::VersionAbsent.into())
            }
            Some(cached) if cached != token_version => {
                tracing::debug!(
                    identity = %identity,
                    token_version,
                    cached_version = %cached,
                    "token version mismatch"
                );
                Err(TokenError::VersionMismatch.into())
            }
            Some(_) => Ok(identity),
        }
    }
}

impl<C: VersionCache> Clone for TokenVerifier<C> {
    fn clone(&self) -> Self {
        Self {
            signer: Arc::clone(&self.signer),
            cache: Arc::clone(&self.cache),
        }
    }
}
