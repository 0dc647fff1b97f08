//! handlers/user_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::AuthUser;
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::models::user_model::{CreateUserRequest, ModifyUserRequest, UserFilter};
use crate::services::user_service::UserService;

/// GET /api/users
pub async fn list_users_endpoint(
    user_service: web::Data<UserService>,
    _user: AuthUser,
    filter: web::Query<UserFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match user_service.list_users(&filter, &pagination).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/users/{id}
pub async fn get_user_endpoint(
    user_service: web::Data<UserService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match user_service.get_user_detail(path.into_inner()).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

/// POST /api/users (solo superusuario)
pub async fn create_user_endpoint(
    user_service: web::Data<UserService>,
    user: AuthUser,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    match user_service.create_user(&user, body.into_inner()).await {
        Ok(detail) => HttpResponse::Created().json(detail),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/users/{id}
pub async fn modify_user_endpoint(
    user_service: web::Data<UserService>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyUserRequest>,
) -> HttpResponse {
    match user_service
        .modify_user(&user, path.into_inner(), body.into_inner())
        .await
    {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/users/{id} (solo superusuario)
pub async fn delete_user_endpoint(
    user_service: web::Data<UserService>,
    user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match user_service.delete_user(&user, id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Usuario", id)),
        Err(e) => e.error_response(),
    }
}
