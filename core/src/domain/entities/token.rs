//! Bearer token claims and the issued token pair.

use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Claims structure for the bearer token payload.
///
/// `sub` and `ver` are optional at the type level so that a decoded foreign
/// token missing either claim can be rejected explicitly instead of failing
/// as an opaque deserialization error. Tokens produced by this service always
/// carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at timestamp (unix seconds)
    pub iat: i64,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Token version at issuance time, canonical decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
}

impl Claims {
    /// Returns the subject identity, or `MissingClaim` when absent or empty.
    pub fn subject(&self) -> Result<&str, TokenError> {
        self.sub
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "sub".to_string(),
            })
    }

    /// Returns the version claim, or `MissingClaim` when absent or empty.
    pub fn version(&self) -> Result<&str, TokenError> {
        self.ver
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "ver".to_string(),
            })
    }
}

/// Bearer token plus refresh secret returned to the client after an
/// issuance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed bearer token
    pub access_token: String,

    /// Opaque refresh secret; the only copy ever handed out
    pub refresh_secret: String,

    /// Bearer token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh secret lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the configured lifetimes.
    pub fn new(
        access_token: String,
        refresh_secret: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_secret,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with(sub: Option<&str>, ver: Option<&str>) -> Claims {
        Claims {
            sub: sub.map(String::from),
            iat: 1_700_000_000,
            exp: 1_700_000_600,
            iss: "sessiongate".to_string(),
            aud: "sessiongate-api".to_string(),
            jti: "a3a7e1a2-0000-0000-0000-000000000000".to_string(),
            ver: ver.map(String::from),
        }
    }

    #[test]
    fn test_subject_and_version_accessors() {
        let claims = claims_with(Some("user-77001"), Some("3"));

        assert_eq!(claims.subject().unwrap(), "user-77001");
        assert_eq!(claims.version().unwrap(), "3");
    }

    #[test]
    fn test_missing_subject() {
        let claims = claims_with(None, Some("1"));

        assert!(matches!(
            claims.subject(),
            Err(TokenError::MissingClaim { claim }) if claim == "sub"
        ));
    }

    #[test]
    fn test_empty_version_is_missing() {
        let claims = claims_with(Some("id"), Some(""));

        assert!(matches!(
            claims.version(),
            Err(TokenError::MissingClaim { claim }) if claim == "ver"
        ));
    }

    #[test]
    fn test_claims_serialization_omits_absent_claims() {
        let claims = claims_with(Some("id"), None);
        let json = serde_json::to_string(&claims).unwrap();

        assert!(json.contains("\"sub\""));
        assert!(!json.contains("\"ver\""));

        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
    }
}
