/// HTTP middleware for resume-service
///
/// - `JwtAuthMiddleware`: validates `Authorization: Bearer` tokens issued by
///   the identity provider and stores the caller as `AuthUser` in request
///   extensions. Requests without a usable token pass through anonymously;
///   handlers that need a caller reject them through the `AuthUser` extractor.
/// - `MetricsMiddleware`: request latency and counters per route pattern.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::metrics::http::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

// =====================================================================
// JWT Authentication
// =====================================================================

/// Claims carried by identity-provider tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iss: Option<String>,
}

/// Authenticated caller, available to handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.unwrap_or_default(),
            name: claims.name,
            picture: claims.picture,
        }
    }
}

/// HS256 token checker shared by all workers.
///
/// A blank secret disables token auth entirely: every token is refused, since
/// HMAC would otherwise accept tokens signed with the empty key.
pub struct TokenValidator {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.jwt_issuer {
            validation.set_issuer(&[issuer.as_str()]);
        }

        let key = (!config.jwt_secret.trim().is_empty())
            .then(|| DecodingKey::from_secret(config.jwt_secret.as_bytes()));

        Self { key, validation }
    }

    pub fn validate(&self, token: &str) -> Result<AuthUser, jsonwebtoken::errors::Error> {
        let key = self.key.as_ref().ok_or(ErrorKind::InvalidSignature)?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Actix middleware that validates a Bearer token when one is present.
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    validator: Arc<TokenValidator>,
}

impl JwtAuthMiddleware {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            validator: self.validator.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    validator: Arc<TokenValidator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let validator = self.validator.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            // A bad or stale token leaves the request anonymous; read-only
            // routes still answer and `AuthUser` turns writes into 401.
            match auth_header.as_deref().map(|h| h.strip_prefix("Bearer ")) {
                Some(Some(token)) => match validator.validate(token) {
                    Ok(user) => {
                        req.extensions_mut().insert(user);
                    }
                    Err(err) => tracing::debug!("Ignoring rejected bearer token: {}", err),
                },
                Some(None) => tracing::debug!("Ignoring non-Bearer Authorization header"),
                None => {}
            }

            service.call(req).await
        })
    }
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()).into()),
        )
    }
}

// =====================================================================
// Metrics middleware
// =====================================================================

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let route = req
            .match_pattern()
            .unwrap_or_else(|| "unmatched".to_string());
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed();

            let status = match &res {
                Ok(response) => response.status().as_u16().to_string(),
                Err(err) => err.as_response_error().status_code().as_u16().to_string(),
            };

            HTTP_REQUEST_DURATION_SECONDS
                .with_label_values(&[&method, &route, &status])
                .observe(elapsed.as_secs_f64());
            HTTP_REQUESTS_TOTAL
                .with_label_values(&[&method, &route, &status])
                .inc();

            tracing::debug!(%method, %route, %status, elapsed_ms = elapsed.as_millis() as u64, "request completed");
            res
        })
    }
}
