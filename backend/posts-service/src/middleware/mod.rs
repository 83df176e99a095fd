/// HTTP middleware utilities for posts-service
///
/// Provides gateway identity propagation and simple request metrics logging.
/// Authentication itself happens upstream; the gateway forwards the resolved
/// identity in `x-user-id` / `x-user-role`.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use error_types::{AuthError, ServiceError};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

pub const ADMIN_ROLE: &str = "admin";
const DEFAULT_ROLE: &str = "user";

// =====================================================================
// Gateway identity
// =====================================================================

/// Caller identifier stored in request extensions by [`IdentityMiddleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// Caller role stored in request extensions by [`IdentityMiddleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRole(pub String);

impl UserRole {
    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN_ROLE
    }

    /// `Forbidden` unless the caller holds the admin role.
    pub fn require_admin(&self, action: &str, resource: &str) -> Result<(), ServiceError> {
        if self.is_admin() {
            return Ok(());
        }
        AuthError::InsufficientPermissions {
            required: ADMIN_ROLE.to_string(),
            actual: self.0.clone(),
        }
        .log();
        Err(ServiceError::PermissionDenied {
            action: action.to_string(),
            resource: resource.to_string(),
        })
    }
}

/// Resolve the forwarded identity from request headers.
pub fn identity_from_request(req: &HttpRequest) -> Result<(UserId, UserRole), AuthError> {
    let raw_id = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredentials)?;

    let user_id = Uuid::parse_str(raw_id.trim()).map_err(|_| AuthError::InvalidCredentials)?;

    let role = req
        .headers()
        .get(USER_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE)
        .to_string();

    Ok((UserId(user_id), UserRole(role)))
}

/// Actix middleware that trusts the gateway-forwarded identity headers and
/// rejects requests that carry none.
pub struct IdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct IdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
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

        Box::pin(async move {
            let (user_id, role) =
                identity_from_request(req.request()).map_err(AppError::from)?;

            req.extensions_mut().insert(user_id);
            req.extensions_mut().insert(role);

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .copied()
                .ok_or_else(|| AppError::from(AuthError::MissingCredentials)),
        )
    }
}

impl FromRequest for UserRole {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserRole>()
                .cloned()
                .ok_or_else(|| AppError::from(AuthError::MissingCredentials)),
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
        let path = req.path().to_string();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed().as_millis();
            let status = res.as_ref().map(|r| r.status().as_u16()).unwrap_or_default();
            tracing::debug!(%method, %path, %elapsed, status, "request completed");
            res
        })
    }
}
