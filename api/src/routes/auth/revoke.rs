use actix_web::{web, HttpResponse};

use sg_core::errors::DomainError;
use sg_core::repositories::{SessionStore, VersionCache};
use sg_shared::types::response::ApiResponse;

use crate::dto::auth::{IdentityResponse, RevokeRequest};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/revoke
///
/// Administrative forced logout. Bumps the identity's token version so every
/// outstanding bearer token dies on its next verification, and orphans the
/// stored refresh secret; the identity must authenticate from scratch.
///
/// # Errors
/// - 404 Not Found: no session record for this identity
/// - 409 Conflict: lost against a concurrent rotation; retry
pub async fn revoke<S, C>(
    state: web::Data<AppState<S, C>>,
    request: web::Json<RevokeRequest>,
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

    match state.issuer.revoke(identity).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(IdentityResponse {
            identity: identity.to_string(),
        })),
        Err(error) => handle_domain_error(error),
    }
}
