//! Pure bearer-token signing and verification.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;

/// Stateless signer/verifier for bearer tokens.
///
/// Verification checks signature, structure, expiry (with the configured
/// clock-skew allowance), issuer, and audience. It touches no store and has
/// no side effects; whether the token's version is still current is decided
/// separately by the verifier against the version cache.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Creates a signer from the token configuration (HS256 symmetric key).
    pub fn new(config: &TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.leeway = config.clock_skew;

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Encodes and signs the given claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))
    }

    /// Verifies a bearer token and returns its claims.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if signature and timestamps hold
    /// * `Err(TokenError)` - `SignatureInvalid`, `Expired`, or `Malformed`
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::Expired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::SignatureInvalid)
                    }
                    _ => DomainError::Token(TokenError::Malformed),
                }
            })?;

        Ok(token_data.claims)
    }
}
