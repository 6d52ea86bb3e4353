//! Application route wiring

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use sg_core::repositories::{SessionStore, VersionCache};

use crate::middleware::auth::{BearerAuth, VerifierHandle};
use crate::routes;

/// Registers the health endpoint and the auth routes.
///
/// The `/me` endpoint sits behind the bearer-token middleware; login,
/// refresh, and revoke are reachable without a token.
pub fn configure<S, C>(cfg: &mut web::ServiceConfig, verifier: Arc<dyn VerifierHandle>)
where
    S: SessionStore + 'static,
    C: VersionCache + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(routes::auth::login::login::<S, C>))
            .route(
                "/refresh",
                web::post().to(routes::auth::refresh::refresh::<S, C>),
            )
            .route(
                "/revoke",
                web::post().to(routes::auth::revoke::revoke::<S, C>),
            )
            .service(
                web::resource("/me")
                    .wrap(BearerAuth::new(verifier))
                    .route(web::get().to(routes::auth::me::me)),
            ),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sessiongate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
