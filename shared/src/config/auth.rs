//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Allowed clock skew when validating timestamps, in seconds
    #[serde(default = "default_clock_skew")]
    pub clock_skew: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            issuer: String::from("sessiongate"),
            audience: String::from("sessiongate-api"),
            access_token_lifetime: 600, // 10 minutes
            clock_skew: default_clock_skew(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.access_token_lifetime = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh secret lifetime in seconds
    pub refresh_secret_lifetime: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            refresh_secret_lifetime: 604800, // 7 days
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sessiongate".to_string());
        let audience =
            std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sessiongate-api".to_string());
        let access_token_lifetime = std::env::var("JWT_ACCESS_TOKEN_LIFETIME")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .unwrap_or(600);
        let refresh_secret_lifetime = std::env::var("REFRESH_SECRET_LIFETIME")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                audience,
                access_token_lifetime,
                clock_skew: default_clock_skew(),
            },
            refresh_secret_lifetime,
        }
    }

    /// Set refresh secret lifetime in days
    pub fn with_refresh_lifetime_days(mut self, days: i64) -> Self {
        self.refresh_secret_lifetime = days * 86400;
        self
    }
}

fn default_clock_skew() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_lifetime, 600);
        assert_eq!(config.issuer, "sessiongate");
        assert_eq!(config.audience, "sessiongate-api");
        assert_eq!(config.clock_skew, 30);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_access_lifetime_minutes(30);

        assert_eq!(config.access_token_lifetime, 1800);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_auth_config_refresh_lifetime() {
        let config = AuthConfig::default().with_refresh_lifetime_days(14);
        assert_eq!(config.refresh_secret_lifetime, 1209600);
    }
}
