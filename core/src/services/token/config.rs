//! Configuration for the token services

/// Configuration shared by the signer, issuer, rotator, and verifier
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Expected issuer claim
    pub issuer: String,
    /// Expected audience claim
    pub audience: String,
    /// Bearer token lifetime in seconds
    pub access_token_lifetime: i64,
    /// Refresh secret lifetime in seconds; also the version-cache TTL
    pub refresh_secret_lifetime: i64,
    /// Allowed clock skew when validating timestamps, in seconds
    pub clock_skew: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            issuer: "sessiongate".to_string(),
            audience: "sessiongate-api".to_string(),
            access_token_lifetime: 600,       // 10 minutes
            refresh_secret_lifetime: 604_800, // 7 days
            clock_skew: 30,
        }
    }
}
