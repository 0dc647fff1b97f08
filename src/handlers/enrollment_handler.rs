//! handlers/enrollment_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::AuthUser;
use crate::models::enrollment_model::{
    CreateEnrollmentRequest, EnrollmentFilter, ModifyEnrollmentRequest,
};
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::services::enrollment_service::EnrollmentService;

/// GET /api/enrollments
pub async fn list_enrollments_endpoint(
    enrollment_service: web::Data<EnrollmentService>,
    _user: AuthUser,
    filter: web::Query<EnrollmentFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match enrollment_service
        .list_enrollments(&filter, &pagination)
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/enrollments/{id}
pub async fn get_enrollment_endpoint(
    enrollment_service: web::Data<EnrollmentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match enrollment_service
        .get_enrollment_detail(path.into_inner())
        .await
    {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

/// POST /api/enrollments
pub async fn create_enrollment_endpoint(
    enrollment_service: web::Data<EnrollmentService>,
    user: AuthUser,
    body: web::Json<CreateEnrollmentRequest>,
) -> HttpResponse {
    match enrollment_service
        .create_enrollment(&user, body.into_inner())
        .await
    {
        Ok(detail) => HttpResponse::Created().json(detail),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/enrollments/{id}
pub async fn modify_enrollment_endpoint(
    enrollment_service: web::Data<EnrollmentService>,
    _user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyEnrollmentRequest>,
) -> HttpResponse {
    match enrollment_service
        .modify_enrollment(path.into_inner(), body.into_inner())
        .await
    {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/enrollments/{id}
pub async fn delete_enrollment_endpoint(
    enrollment_service: web::Data<EnrollmentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match enrollment_service.delete_enrollment(id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Inscripción", id)),
        Err(e) => e.error_response(),
    }
}
