/// JWT Authentication Middleware
///
/// Validates the bearer token from the Authorization header, rejects revoked
/// tokens, and injects the claims into request extensions for route handlers.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{extract_bearer_token, Claims};
use crate::error::{AppError, AuthError};
use crate::service::AuthService;

/// JWT middleware for protecting routes
///
/// Must be applied to routes that require authentication.
pub struct JwtMiddleware {
    auth_service: web::Data<AuthService>,
}

impl JwtMiddleware {
    /// Create new JWT middleware instance
    pub fn new(auth_service: web::Data<AuthService>) -> Self {
        Self { auth_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            auth_service: self.auth_service.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    auth_service: web::Data<AuthService>,
}

impl<S> JwtMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<Claims, AuthError> {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::TokenInvalid("Invalid authorization header format".to_string()))?;

        let token = extract_bearer_token(header)?;
        self.auth_service.authenticate(token)
    }
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = self.authenticate(&req);

        match authenticated {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.sub, "JWT validated successfully");

                // Inject claims into request extensions
                req.extensions_mut().insert(claims);

                let service = self.service.clone();
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok::<_, Error>(res.map_into_left_body())
                })
            }
            Err(e) => {
                // Rendered here so the rejection goes out as the JSON error envelope.
                let response = AppError::from(e).error_response();
                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok::<_, Error>(res) })
            }
        }
    }
}
