use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use sg_api::app;
use sg_api::middleware::auth::VerifierHandle;
use sg_api::middleware::cors::create_cors;
use sg_api::routes::auth::AppState;
use sg_core::services::token::{
    RefreshRotator, TokenConfig, TokenIssuer, TokenSigner, TokenVerifier,
};
use sg_infra::{DatabasePool, MySqlSessionStore, RedisClient, RedisVersionCache};
use sg_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    let bind_address = config.server.bind_address();
    tracing::info!("Starting SessionGate API on {}", bind_address);

    let pool = DatabasePool::new(config.database.clone())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let redis = RedisClient::new(config.cache.clone())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let store = Arc::new(MySqlSessionStore::new(pool.get_pool().clone()));
    let cache = Arc::new(RedisVersionCache::new(redis));

    let token_config = TokenConfig {
        jwt_secret: config.auth.jwt.secret.clone(),
        issuer: config.auth.jwt.issuer.clone(),
        audience: config.auth.jwt.audience.clone(),
        access_token_lifetime: config.auth.jwt.access_token_lifetime,
        refresh_secret_lifetime: config.auth.refresh_secret_lifetime,
        clock_skew: config.auth.jwt.clock_skew,
    };

    let signer = Arc::new(TokenSigner::new(&token_config));
    let issuer = TokenIssuer::new(
        Arc::clone(&store),
        Arc::clone(&cache),
        Arc::clone(&signer),
        token_config,
    );
    let rotator = RefreshRotator::new(Arc::clone(&store), issuer.clone());
    let verifier: Arc<dyn VerifierHandle> =
        Arc::new(TokenVerifier::new(signer, Arc::clone(&cache)));

    let state = web::Data::new(AppState { issuer, rotator });

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(create_cors())
            .app_data(state.clone())
            .configure(|cfg| {
                app::configure::<MySqlSessionStore, RedisVersionCache>(cfg, Arc::clone(&verifier))
            })
    })
    .bind(&bind_address)?
    .run()
    .await
}
