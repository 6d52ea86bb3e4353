//! Domain-specific error types and error handling.

use sg_shared::types::response::{error_codes, ErrorResponse};
use thiserror::Error;

/// Bearer-token verification and signing errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },

    #[error("No token version for this identity")]
    VersionAbsent,

    #[error("Token version mismatch")]
    VersionMismatch,

    #[error("Token signing failed")]
    SigningFailed,
}

/// Session-store and refresh-rotation errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid refresh token")]
    RefreshTokenInvalid,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh lost to a concurrent rotation")]
    RefreshConflict,

    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Version cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("Session store and version cache are out of sync")]
    StoreInconsistent,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Convert TokenError to ErrorResponse.
///
/// Every verification failure maps onto the single `UNAUTHORIZED` code; the
/// specific kind stays in the logs and is never echoed to the caller.
impl From<TokenError> for ErrorResponse {
    fn from(_: TokenError) -> Self {
        ErrorResponse::new(error_codes::UNAUTHORIZED, "Invalid or expired token.")
    }
}

/// Convert SessionError to ErrorResponse
impl From<SessionError> for ErrorResponse {
    fn from(err: SessionError) -> Self {
        let (code, message) = match &err {
            SessionError::RefreshTokenInvalid => (
                error_codes::REFRESH_TOKEN_INVALID,
                "Invalid refresh token.",
            ),
            SessionError::RefreshTokenExpired => (
                error_codes::REFRESH_TOKEN_EXPIRED,
                "Refresh token has expired.",
            ),
            SessionError::RefreshConflict => (
                error_codes::REFRESH_CONFLICT,
                "Refresh token was rotated concurrently. Retry once with the new token.",
            ),
            SessionError::StoreUnavailable { .. }
            | SessionError::CacheUnavailable { .. }
            | SessionError::StoreInconsistent => (
                error_codes::SERVICE_UNAVAILABLE,
                "Session service is temporarily unavailable. Please try again.",
            ),
        };

        ErrorResponse::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_collapse_to_unauthorized() {
        for err in [
            TokenError::Expired,
            TokenError::SignatureInvalid,
            TokenError::VersionAbsent,
            TokenError::VersionMismatch,
        ] {
            let response: ErrorResponse = err.into();
            assert_eq!(response.error, "UNAUTHORIZED");
            assert_eq!(response.message, "Invalid or expired token.");
        }
    }

    #[test]
    fn test_refresh_conflict_is_distinguishable() {
        let response: ErrorResponse = SessionError::RefreshConflict.into();
        assert_eq!(response.error, "REFRESH_CONFLICT");
    }

    #[test]
    fn test_domain_error_bridges() {
        let err: DomainError = TokenError::VersionMismatch.into();
        assert!(matches!(err, DomainError::Token(TokenError::VersionMismatch)));

        let err: DomainError = SessionError::RefreshTokenExpired.into();
        assert!(matches!(
            err,
            DomainError::Session(SessionError::RefreshTokenExpired)
        ));
    }
}
