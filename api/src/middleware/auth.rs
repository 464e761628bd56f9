//! Access gate for protected path prefixes.
//!
//! Requests whose path starts with a protected prefix must carry
//! `Authorization: Bearer <token>`. The token is verified with the core
//! `TokenService` and the resulting `AuthContext` is placed in the request
//! extensions for handlers to extract. Any other path passes through
//! untouched. Nothing is cached; every request is checked afresh.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use bizreg_core::{
    domain::entities::token::SessionIdentity,
    errors::{AuthError, DomainError},
    services::token::TokenService,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated caller, injected by the access gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
}

impl From<SessionIdentity> for AuthContext {
    fn from(identity: SessionIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
        }
    }
}

/// Access gate middleware factory
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<TokenService>,
    protected_prefixes: Rc<Vec<String>>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, protected_prefixes: Vec<String>) -> Self {
        Self {
            tokens,
            protected_prefixes: Rc::new(protected_prefixes),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
            protected_prefixes: Rc::clone(&self.protected_prefixes),
        }))
    }
}

pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
    protected_prefixes: Rc<Vec<String>>,
}

impl<S> AccessGateMiddleware<S> {
    fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| is_under_prefix(path, prefix))
    }

    fn authenticate(&self, req: &ServiceRequest) -> Result<AuthContext, ApiError> {
        let token = extract_bearer_token(req)
            .ok_or_else(|| ApiError::from(DomainError::Auth(AuthError::MissingToken)))?;
        let identity = self.tokens.verify(&token).map_err(|e| {
            tracing::warn!(path = req.path(), error = %e, event = "token_rejected", "Session token rejected");
            ApiError::from(e)
        })?;
        Ok(identity.into())
    }
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.is_protected(req.path()) {
            let service = Rc::clone(&self.service);
            return Box::pin(async move { service.call(req).await.map(|res| res.map_into_left_body()) });
        }

        match self.authenticate(&req) {
            Ok(context) => {
                req.extensions_mut().insert(context);
                let service = Rc::clone(&self.service);
                Box::pin(async move { service.call(req).await.map(|res| res.map_into_left_body()) })
            }
            Err(error) => {
                let response = error.error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Token of a literal `Bearer <token>` header; anything else counts as absent
/// Whether `path` is `prefix` itself or lies below it, segment-wise
fn is_under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized).into());

        ready(result)
    }
}
