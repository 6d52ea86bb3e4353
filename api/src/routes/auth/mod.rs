//! Authentication route handlers
//!
//! - Login: mints a session for an identity asserted upstream
//! - Refresh: rotates the refresh secret
//! - Revoke: administrative forced logout
//! - Me: echoes the identity the middleware authenticated

pub mod login;
pub mod me;
pub mod refresh;
pub mod revoke;

use sg_core::repositories::{SessionStore, VersionCache};
use sg_core::services::token::{RefreshRotator, TokenIssuer};

/// Shared application state injected into the auth handlers
pub struct AppState<S: SessionStore, C: VersionCache> {
    pub issuer: TokenIssuer<S, C>,
    pub rotator: RefreshRotator<S, C>,
}
