use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service;
use crate::utils::AppError;

/// Routes reachable without a token. Everything else on the app requires a
/// verified bearer token.
fn is_public(method: &Method, path: &str) -> bool {
    // CORS preflight never carries credentials
    if *method == Method::OPTIONS {
        return true;
    }
    if *method == Method::GET {
        return matches!(path, "/" | "/health" | "/instructors" | "/classes")
            || path.starts_with("/classes/")
            || path.starts_with("/feedback/");
    }
    *method == Method::POST && matches!(path, "/jwt" | "/users")
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        // The scheme word before the space is deliberately not checked; only
        // the token after it has to verify.
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.split(' ').nth(1))
            .map(str::to_owned);

        let claims = match token.as_deref().map(token_service::verify) {
            Some(Ok(claims)) => claims,
            _ => {
                return Box::pin(async move { Err(AppError::Unauthorized.into()) });
            }
        };

        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public(&Method::GET, "/"));
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::GET, "/instructors"));
        assert!(is_public(&Method::GET, "/classes"));
        assert!(is_public(&Method::GET, "/classes/64b0c0ffee0ddeadbeef0001"));
        assert!(is_public(&Method::GET, "/feedback/64b0c0ffee0ddeadbeef0001"));
        assert!(is_public(&Method::POST, "/jwt"));
        assert!(is_public(&Method::POST, "/users"));
        assert!(is_public(&Method::OPTIONS, "/carts"));
    }

    #[test]
    fn test_protected_routes() {
        assert!(!is_public(&Method::GET, "/users"));
        assert!(!is_public(&Method::GET, "/carts"));
        assert!(!is_public(&Method::POST, "/classes"));
        assert!(!is_public(&Method::POST, "/carts"));
        assert!(!is_public(&Method::DELETE, "/carts/64b0c0ffee0ddeadbeef0001"));
        assert!(!is_public(&Method::PATCH, "/feedback/64b0c0ffee0ddeadbeef0001"));
        assert!(!is_public(&Method::PATCH, "/manageclass/approve/64b0c0ffee0ddeadbeef0001"));
        assert!(!is_public(&Method::POST, "/payments"));
        assert!(!is_public(&Method::GET, "/paymenthistory"));
    }
}
