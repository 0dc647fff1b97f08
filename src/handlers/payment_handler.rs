//! handlers/payment_handler.rs
use actix_web::{web, HttpResponse, ResponseError};

use crate::models::auth_model::AuthUser;
use crate::models::page_model::{DeleteResponse, PaginationQuery};
use crate::models::payment_model::{CreatePaymentRequest, ModifyPaymentRequest, PaymentFilter};
use crate::services::payment_service::PaymentService;

/// GET /api/payments
pub async fn list_payments_endpoint(
    payment_service: web::Data<PaymentService>,
    _user: AuthUser,
    filter: web::Query<PaymentFilter>,
    pagination: web::Query<PaginationQuery>,
) -> HttpResponse {
    match payment_service.list_payments(&filter, &pagination).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => e.error_response(),
    }
}

/// GET /api/payments/{id}
pub async fn get_payment_endpoint(
    payment_service: web::Data<PaymentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    match payment_service.get_payment(path.into_inner()).await {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(e) => e.error_response(),
    }
}

/// POST /api/payments
pub async fn create_payment_endpoint(
    payment_service: web::Data<PaymentService>,
    _user: AuthUser,
    body: web::Json<CreatePaymentRequest>,
) -> HttpResponse {
    match payment_service.create_payment(body.into_inner()).await {
        Ok(payment) => HttpResponse::Created().json(payment),
        Err(e) => e.error_response(),
    }
}

/// PATCH /api/payments/{id}
pub async fn modify_payment_endpoint(
    payment_service: web::Data<PaymentService>,
    _user: AuthUser,
    path: web::Path<i64>,
    body: web::Json<ModifyPaymentRequest>,
) -> HttpResponse {
    match payment_service
        .modify_payment(path.into_inner(), body.into_inner())
        .await
    {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(e) => e.error_response(),
    }
}

/// DELETE /api/payments/{id}
pub async fn delete_payment_endpoint(
    payment_service: web::Data<PaymentService>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match payment_service.delete_payment(id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse::new("Pago", id)),
        Err(e) => e.error_response(),
    }
}
