//! handlers/student_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::AuthUser;
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::models::student_model::{CreateStudentRequest, ModifyStudentRequest, StudentFilter};
use crate::services::student_service::StudentService;

/// GET /api/students
pub async fn list_students_endpoint(
    student_service: web::Data<StudentService>,
    _user: AuthUser,
    filter: web::Query<StudentFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match student_service.list_students(&filter, &pagination).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/students/{id}
pub async fn get_student_endpoint(
    student_service: web::Data<StudentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match student_service.get_student(path.into_inner()).await {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => e.error_response(),
    }
}

/// POST /api/students
pub async fn create_student_endpoint(
    student_service: web::Data<StudentService>,
    _user: AuthUser,
    body: web::Json<CreateStudentRequest>,
) -> HttpResponse {
    match student_service.create_student(body.into_inner()).await {
        Ok(student) => HttpResponse::Created().json(student),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/students/{id}
pub async fn modify_student_endpoint(
    student_service: web::Data<StudentService>,
    _user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyStudentRequest>,
) -> HttpResponse {
    match student_service
        .modify_student(path.into_inner(), body.into_inner())
        .await
    {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/students/{id}
pub async fn delete_student_endpoint(
    student_service: web::Data<StudentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match student_service.delete_student(id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Alumno", id)),
        Err(e) => e.error_response(),
    }
}
