// Extrai a sessão (cookie ou Bearer) e injeta as claims nas extensions
// do request. Nunca rejeita: rotas públicas seguem sem sessão e os
// handlers de mutação decidem com base no papel do usuário.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::session_service::{verify_session_token, SESSION_COOKIE_NAME};

pub struct SessionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService { service }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
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
        // Cookie de sessão tem precedência; Authorization: Bearer é aceito
        // para clientes não-browser.
        let token = req
            .cookie(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                req.headers()
                    .get("Authorization")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(|token| token.to_string())
            });

        if let Some(token) = token {
            if let Ok(claims) = verify_session_token(&token) {
                req.extensions_mut().insert(claims);
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
