//! handlers/auth_handler.rs
//! Endpoints públicos de JWT: emisión, verificación y refresco.

use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::{AuthUser, TokenAuthRequest, TokenRequest};
use crate::services::{auth_service::AuthService, user_service::UserService};

/// POST /api/auth/token
pub async fn token_auth_endpoint(
    auth_service: web::Data<AuthService>,
    body: web::Json<TokenAuthRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    match auth_service.token_auth(&req.username, &req.password).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.error_response(),
    }
}

/// POST /api/auth/verify
pub async fn verify_token_endpoint(
    auth_service: web::Data<AuthService>,
    body: web::Json<TokenRequest>,
) -> HttpResponse {
    match auth_service.verify_token(&body.token) {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.error_response(),
    }
}

/// POST /api/auth/refresh
pub async fn refresh_token_endpoint(
    auth_service: web::Data<AuthService>,
    body: web::Json<TokenRequest>,
) -> HttpResponse {
    match auth_service.refresh_token(&body.token).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.error_response(),
    }
}

/// GET /api/auth/me
pub async fn me_endpoint(user_service: web::Data<UserService>, user: AuthUser) -> HttpResponse {
    match user_service.get_user_detail(user.id).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}
