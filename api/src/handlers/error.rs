//! Mapping of domain errors onto HTTP responses.
//!
//! Verification failures all collapse onto one 401 body so a caller cannot
//! tell a tampered token from an expired or revoked one. Refresh failures
//! stay distinguishable so a legitimate client knows whether to retry
//! (conflict) or to re-authenticate (invalid/expired).

use actix_web::HttpResponse;

use sg_core::errors::{DomainError, SessionError};
use sg_shared::types::response::{error_codes, ErrorResponse};

/// The single externally visible verification rejection
pub fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Invalid or expired token.",
    ))
}

/// Handle domain errors and convert them to HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => {
            tracing::debug!("token rejected: {:?}", token_error);
            unauthorized_response()
        }
        DomainError::Session(session_error) => match session_error {
            SessionError::RefreshTokenInvalid => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::REFRESH_TOKEN_INVALID,
                    "Invalid refresh token.",
                ))
            }
            SessionError::RefreshTokenExpired => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::REFRESH_TOKEN_EXPIRED,
                    "Refresh token has expired.",
                ))
            }
            SessionError::RefreshConflict => HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::REFRESH_CONFLICT,
                "Refresh token was rotated concurrently. Retry once with the new token.",
            )),
            SessionError::StoreUnavailable { message } => {
                tracing::error!("session store unavailable: {}", message);
                service_unavailable()
            }
            SessionError::CacheUnavailable { message } => {
                tracing::error!("version cache unavailable: {}", message);
                service_unavailable()
            }
            SessionError::StoreInconsistent => {
                tracing::error!("session store and version cache out of sync");
                service_unavailable()
            }
        },
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Internal { message } => {
            tracing::error!("internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal server error occurred.",
            ))
        }
    }
}

fn service_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
        error_codes::SERVICE_UNAVAILABLE,
        "Session service is temporarily unavailable. Please try again.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use sg_core::errors::TokenError;

    #[test]
    fn test_all_token_errors_map_to_401() {
        for err in [
            TokenError::Malformed,
            TokenError::Expired,
            TokenError::SignatureInvalid,
            TokenError::VersionAbsent,
            TokenError::VersionMismatch,
        ] {
            let response = handle_domain_error(err.into());
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_refresh_conflict_maps_to_409() {
        let response = handle_domain_error(SessionError::RefreshConflict.into());
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_outages_map_to_503() {
        let response = handle_domain_error(
            SessionError::StoreUnavailable {
                message: "down".to_string(),
            }
            .into(),
        );
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
