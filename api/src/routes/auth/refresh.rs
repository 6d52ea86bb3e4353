use actix_web::{web, HttpResponse};

use sg_core::errors::DomainError;
use sg_core::repositories::{SessionStore, VersionCache};
use sg_shared::types::response::ApiResponse;

use crate::dto::auth::{AuthTokensResponse, RefreshRequest};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new (bearer token, refresh token) pair.
/// The presented token is single-use; the rotation bumps the token version,
/// which immediately invalidates all previously issued bearer tokens.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "string"
/// }
/// ```
///
/// # Errors
/// - 401 `REFRESH_TOKEN_INVALID`: unknown or already rotated token; re-authenticate
/// - 401 `REFRESH_TOKEN_EXPIRED`: token past its lifetime; re-authenticate
/// - 409 `REFRESH_CONFLICT`: lost against a concurrent refresh; retry once
/// - 503 `SERVICE_UNAVAILABLE`: store/cache outage, or the caches need to
///   resynchronize; retry
pub async fn refresh<S, C>(
    state: web::Data<AppState<S, C>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    C: VersionCache + 'static,
{
    if request.refresh_token.is_empty() {
        return handle_domain_error(DomainError::Validation {
            message: "refresh_token is required".to_string(),
        });
    }

    match state.rotator.rotate(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(AuthTokensResponse::from(pair))),
        Err(error) => handle_domain_error(error),
    }
}
