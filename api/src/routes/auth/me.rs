use actix_web::HttpResponse;

use sg_shared::types::response::ApiResponse;

use crate::dto::auth::IdentityResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Protected endpoint; the bearer-token middleware has already verified the
/// request and injected the identity.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(IdentityResponse {
        identity: auth.identity,
    }))
}
