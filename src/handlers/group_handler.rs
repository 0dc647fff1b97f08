//! handlers/group_handler.rs
//! Grupos y membresías. Las mutaciones exigen superusuario.
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::models::auth_model::AuthUser;
use crate::models::group_model::{CreateGroupRequest, GroupMemberRequest};
use crate::models::page_model::DeleteResponse;
use crate::services::group_service::GroupService;

/// GET /api/groups
pub async fn list_groups_endpoint(
    group_service: web::Data<GroupService>,
    _user: AuthUser,
) -> HttpResponse {
    match group_service.list_groups().await {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => e.error_response(),
    }
}

/// GET /api/groups/{id}
pub async fn get_group_endpoint(
    group_service: web::Data<GroupService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match group_service.get_group(path.into_inner()).await {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => e.error_response(),
    }
}

/// POST /api/groups
pub async fn create_group_endpoint(
    group_service: web::Data<GroupService>,
    user: AuthUser,
    body: web::Json<CreateGroupRequest>,
) -> HttpResponse {
    match group_service.create_group(&user, body.into_inner()).await {
        Ok(group) => HttpResponse::Created().json(group),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/groups/{id}
pub async fn delete_group_endpoint(
    group_service: web::Data<GroupService>,
    user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match group_service.delete_group(&user, id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Grupo", id)),
        Err(e) => e.error_response(),
    }
}

/// GET /api/groups/{id}/members
pub async fn list_members_endpoint(
    group_service: web::Data<GroupService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match group_service.list_members(path.into_inner()).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => e.error_response(),
    }
}

/// POST /api/groups/{id}/members
pub async fn add_member_endpoint(
    group_service: web::Data<GroupService>,
    user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<GroupMemberRequest>,
) -> HttpResponse {
    let group_id = path.into_inner();
    let user_id = body.into_inner().user_id;
    match group_service.add_member(&user, group_id, user_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "group_id": group_id,
            "user_id": user_id,
        })),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/groups/{id}/members/{user_id}
pub async fn remove_member_endpoint(
    group_service: web::Data<GroupService>,
    user: AuthUser,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (group_id, user_id) = path.into_inner();
    match group_service.remove_member(&user, group_id, user_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "group_id": group_id,
            "user_id": user_id,
        })),
        Err(e) => e.error_response(),
    }
}
