use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
};
use biz_service::biz_service::user_service::TokenVerifier;
use bson::oid::ObjectId;
use common::errors::AppError;
use futures_util::future::{LocalBoxFuture, Ready, ok, ready};
use log::debug;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Identity attached to a request by [`AuthMiddleware`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: ObjectId,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.extensions().get::<AuthUser>().cloned().ok_or(AppError::Unauthorized))
    }
}

/// Extracts the token from `Authorization: Bearer <token>`; the scheme is case-insensitive.
pub fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Bearer-token authentication. Requests without a known token are answered
/// with 401 and never reach the wrapped service.
pub struct AuthMiddleware {
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AuthMiddleware {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService { service: Rc::new(service), verifier: self.verifier.clone() })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let verifier = self.verifier.clone();
        Box::pin(async move {
            let found = match bearer_token(&req) {
                Some(token) => verifier.verify_token(&token).await,
                None => Ok(None),
            };
            let err = match found {
                Ok(Some(user)) => {
                    req.extensions_mut().insert(AuthUser { id: user.id, email: user.email });
                    let res = srv.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
                Ok(None) => {
                    debug!("rejected {} {}: missing or unknown bearer token", req.method(), req.path());
                    AppError::Unauthorized
                }
                Err(e) => e,
            };
            Ok(req.into_response(err.error_response()).map_into_right_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn token_of(header: Option<&str>) -> Option<String> {
        let req = match header {
            Some(value) => TestRequest::default().insert_header((AUTHORIZATION, value)),
            None => TestRequest::default(),
        };
        bearer_token(&req.to_srv_request())
    }

    #[actix_web::test]
    async fn parses_bearer_header() {
        assert_eq!(token_of(Some("Bearer abc")), Some("abc".to_string()));
        assert_eq!(token_of(Some("bearer  abc ")), Some("abc".to_string()));
        assert_eq!(token_of(Some("Basic abc")), None);
        assert_eq!(token_of(Some("Bearer")), None);
        assert_eq!(token_of(None), None);
    }
}
