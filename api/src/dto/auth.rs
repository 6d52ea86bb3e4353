//! Authentication DTOs

use serde::{Deserialize, Serialize};

use sg_core::domain::entities::token::TokenPair;

/// Body for POST /auth/login.
///
/// The identity arrives already asserted by the upstream login callback;
/// this service only mints the session for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identity: String,
}

/// Body for POST /auth/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body for POST /auth/revoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeRequest {
    pub identity: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

impl From<TokenPair> for AuthTokensResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_secret,
            expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

/// Authenticated identity echo returned by GET /auth/me
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub identity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_response_from_pair() {
        let pair = TokenPair::new(
            "jwt".to_string(),
            "secret".to_string(),
            600,
            604_800,
        );

        let response = AuthTokensResponse::from(pair);

        assert_eq!(response.access_token, "jwt");
        assert_eq!(response.refresh_token, "secret");
        assert_eq!(response.expires_in, 600);
        assert_eq!(response.refresh_expires_in, 604_800);
    }

    #[test]
    fn test_refresh_request_deserialization() {
        let request: RefreshRequest =
            serde_json::from_str(r#"{"refresh_token":"abc"}"#).unwrap();
        assert_eq!(request.refresh_token, "abc");
    }
}
