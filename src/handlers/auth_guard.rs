//! handlers/auth_guard.rs
//! Extractor que exige un JWT válido: `Authorization: Bearer <token>` (o `JWT <token>`).

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use anyhow::anyhow;
use futures_util::future::LocalBoxFuture;

use crate::error::AppError;
use crate::models::auth_model::AuthUser;
use crate::services::auth_service::AuthService;

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_service = req.app_data::<web::Data<AuthService>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let auth_service = auth_service
                .ok_or_else(|| AppError::Internal(anyhow!("AuthService no registrado")))?;
            let token =
                token.ok_or_else(|| AppError::unauthorized("falta el header Authorization"))?;
            auth_service.authenticate(&token).await
        })
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("jwt") {
        Some(token.to_string())
    } else {
        None
    }
}
