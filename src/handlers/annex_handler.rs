//! handlers/annex_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::annex_model::{AnnexFilter, CreateAnnexRequest, ModifyAnnexRequest};
use crate::models::auth_model::AuthUser;
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::services::annex_service::AnnexService;

/// GET /api/annexes
pub async fn list_annexes_endpoint(
    annex_service: web::Data<AnnexService>,
    _user: AuthUser,
    filter: web::Query<AnnexFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match annex_service.list_annexes(&filter, &pagination).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/annexes/{id}
pub async fn get_annex_endpoint(
    annex_service: web::Data<AnnexService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match annex_service.get_annex(path.into_inner()).await {
        Ok(annex) => HttpResponse::Ok().json(annex),
        Err(e) => e.error_response(),
    }
}

/// POST /api/annexes
pub async fn create_annex_endpoint(
    annex_service: web::Data<AnnexService>,
    _user: AuthUser,
    body: web::Json<CreateAnnexRequest>,
) -> HttpResponse {
    match annex_service.create_annex(body.into_inner()).await {
        Ok(annex) => HttpResponse::Created().json(annex),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/annexes/{id}
pub async fn modify_annex_endpoint(
    annex_service: web::Data<AnnexService>,
    _user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyAnnexRequest>,
) -> HttpResponse {
    match annex_service
        .modify_annex(path.into_inner(), body.into_inner())
        .await
    {
        Ok(annex) => HttpResponse::Ok().json(annex),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/annexes/{id}
pub async fn delete_annex_endpoint(
    annex_service: web::Data<AnnexService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match annex_service.delete_annex(id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Anexo", id)),
        Err(e) => e.error_response(),
    }
}
