//! handlers/tutor_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::AuthUser;
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::models::tutor_model::{CreateTutorRequest, ModifyTutorRequest, TutorFilter};
use crate::services::tutor_service::TutorService;

/// GET /api/tutors
pub async fn list_tutors_endpoint(
    tutor_service: web::Data<TutorService>,
    _user: AuthUser,
    filter: web::Query<TutorFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match tutor_service.list_tutors(&filter, &pagination).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/tutors/{id}
pub async fn get_tutor_endpoint(
    tutor_service: web::Data<TutorService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match tutor_service.get_tutor(path.into_inner()).await {
        Ok(tutor) => HttpResponse::Ok().json(tutor),
        Err(e) => e.error_response(),
    }
}

/// POST /api/tutors
pub async fn create_tutor_endpoint(
    tutor_service: web::Data<TutorService>,
    _user: AuthUser,
    body: web::Json<CreateTutorRequest>,
) -> HttpResponse {
    match tutor_service.create_tutor(body.into_inner()).await {
        Ok(tutor) => HttpResponse::Created().json(tutor),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/tutors/{id}
pub async fn modify_tutor_endpoint(
    tutor_service: web::Data<TutorService>,
    _user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyTutorRequest>,
) -> HttpResponse {
    match tutor_service
        .modify_tutor(path.into_inner(), body.into_inner())
        .await
    {
        Ok(tutor) => HttpResponse::Ok().json(tutor),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/tutors/{id}
pub async fn delete_tutor_endpoint(
    tutor_service: web::Data<TutorService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match tutor_service.delete_tutor(id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Tutor", id)),
        Err(e) => e.error_response(),
    }
}
