use actix_web::{web, HttpResponse};

use sg_core::errors::DomainError;
use sg_core::repositories::{SessionStore, VersionCache};
use sg_shared::types::response::ApiResponse;

use crate::dto::auth::{AuthTokensResponse, LoginRequest};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Mints a session for an identity already asserted by the upstream login
/// callback. A repeat login replaces the previous session outright.
///
/// # Response
///
/// ## Success (200 OK)
/// `ApiResponse<AuthTokensResponse>` carrying the bearer token and the new
/// refresh token.
///
/// ## Errors
/// - 400 Bad Request: empty identity
/// - 409 Conflict: lost against a concurrent rotation; retry
/// - 503 Service Unavailable: store or cache write failed, nothing issued
pub async fn login<S, C>(
    state: web::Data<AppState<S, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    C: VersionCache + 'static,
{
    let identity = request.identity.trim();
    if identity.is_empty() {
        return handle_domain_error(DomainError::Validation {
            message: "identity is required".to_string(),
        });
    }

    match state.issuer.login(identity).await {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(AuthTokensResponse::from(pair))),
        Err(error) => handle_domain_error(error),
    }
}
