//! Unit tests for the token services, run against the in-memory fakes.

mod rotator_tests;

use std::sync::Arc;

use crate::repositories::{InMemorySessionStore, InMemoryVersionCache};

use super::{RefreshRotator, TokenConfig, TokenIssuer, TokenSigner, TokenVerifier};

/// Fully wired service set over the in-memory fakes.
pub(crate) struct Harness {
    pub store: Arc<InMemorySessionStore>,
    pub cache: Arc<InMemoryVersionCache>,
    pub signer: Arc<TokenSigner>,
    pub issuer: TokenIssuer<InMemorySessionStore, InMemoryVersionCache>,
    pub rotator: RefreshRotator<InMemorySessionStore, InMemoryVersionCache>,
    pub verifier: TokenVerifier<InMemoryVersionCache>,
    pub config: TokenConfig,
}

pub(crate) fn harness() -> Harness {
    let config = TokenConfig::default();
    let store = Arc::new(InMemorySessionStore::new());
    let cache = Arc::new(InMemoryVersionCache::new());
    let signer = Arc::new(TokenSigner::new(&config));

    let issuer = TokenIssuer::new(
        Arc::clone(&store),
        Arc::clone(&cache),
        Arc::clone(&signer),
        config.clone(),
    );
    let rotator = RefreshRotator::new(Arc::clone(&store), issuer.clone());
    let verifier = TokenVerifier::new(Arc::clone(&signer), Arc::clone(&cache));

    Harness {
        store,
        cache,
        signer,
        issuer,
        rotator,
        verifier,
        config,
    }
}
