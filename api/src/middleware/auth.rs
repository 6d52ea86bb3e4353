//! Bearer-token verification middleware for protected endpoints.
//!
//! Extracts the bearer token from the Authorization header, runs it through
//! the edge verifier, and injects the authenticated identity into the
//! request. Every rejection produces the same 401 body; the reason stays in
//! the logs.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, BoxFuture, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use sg_core::errors::DomainError;
use sg_core::repositories::VersionCache;
use sg_core::services::token::TokenVerifier;

use crate::handlers::error::unauthorized_response;

/// Authenticated identity injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Identity extracted from the verified token
    pub identity: String,
}

/// Object-safe handle over `TokenVerifier`, so the middleware does not need
/// to be generic over the cache implementation.
pub trait VerifierHandle: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, DomainError>>;
}

impl<C: VersionCache + 'static> VerifierHandle for TokenVerifier<C> {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, DomainError>> {
        Box::pin(TokenVerifier::verify(self, token))
    }
}

/// Bearer-token authentication middleware factory
pub struct BearerAuth {
    verifier: Arc<dyn VerifierHandle>,
}

impl BearerAuth {
    /// Creates the middleware over an edge verifier
    pub fn new(verifier: Arc<dyn VerifierHandle>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Bearer-token authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn VerifierHandle>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(unauthorized()),
            };

            match verifier.verify(&token).await {
                Ok(identity) => {
                    req.extensions_mut().insert(AuthContext { identity });
                    service.call(req).await
                }
                Err(err) => {
                    tracing::debug!("bearer token rejected: {}", err);
                    Err(unauthorized())
                }
            }
        })
    }
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Uniform 401 error; never reveals which check failed
fn unauthorized() -> Error {
    InternalError::from_response("unauthorized", unauthorized_response()).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(unauthorized);

        ready(result)
    }
}
