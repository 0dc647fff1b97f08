//! app.rs
use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::json;

use crate::handlers::{
    annex_handler, auth_handler, enrollment_handler, group_handler, payment_handler,
    student_handler, tutor_handler, user_handler,
};

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/token", web::post().to(auth_handler::token_auth_endpoint))
                        .route("/verify", web::post().to(auth_handler::verify_token_endpoint))
                        .route("/refresh", web::post().to(auth_handler::refresh_token_endpoint))
                        .route("/me", web::get().to(auth_handler::me_endpoint)),
                )
                .service(
                    web::scope("/students")
                        .route("", web::get().to(student_handler::list_students_endpoint))
                        .route("", web::post().to(student_handler::create_student_endpoint))
                        .route("/{id}", web::get().to(student_handler::get_student_endpoint))
                        .route(
                            "/{id}",
                            web::patch().to(student_handler::modify_student_endpoint),
                        )
                        .route(
                            "/{id}",
                            web::delete().to(student_handler::delete_student_endpoint),
                        ),
                )
                .service(
                    web::scope("/payments")
                        .route("", web::get().to(payment_handler::list_payments_endpoint))
                        .route("", web::post().to(payment_handler::create_payment_endpoint))
                        .route("/{id}", web::get().to(payment_handler::get_payment_endpoint))
                        .route(
                            "/{id}",
                            web::patch().to(payment_handler::modify_payment_endpoint),
                        )
                        .route(
                            "/{id}",
                            web::delete().to(payment_handler::delete_payment_endpoint),
                        ),
                )
                .service(
                    web::scope("/tutors")
                        .route("", web::get().to(tutor_handler::list_tutors_endpoint))
                        .route("", web::post().to(tutor_handler::create_tutor_endpoint))
                        .route("/{id}", web::get().to(tutor_handler::get_tutor_endpoint))
                        .route("/{id}", web::patch().to(tutor_handler::modify_tutor_endpoint))
                        .route("/{id}", web::delete().to(tutor_handler::delete_tutor_endpoint)),
                )
                .service(
                    web::scope("/enrollments")
                        .route(
                            "",
                            web::get().to(enrollment_handler::list_enrollments_endpoint),
                        )
                        .route(
                            "",
                            web::post().to(enrollment_handler::create_enrollment_endpoint),
                        )
                        .route(
                            "/{id}",
                            web::get().to(enrollment_handler::get_enrollment_endpoint),
                        )
                        .route(
                            "/{id}",
                            web::patch().to(enrollment_handler::modify_enrollment_endpoint),
                        )
                        .route(
                            "/{id}",
                            web::delete().to(enrollment_handler::delete_enrollment_endpoint),
                        ),
                )
                .service(
                    web::scope("/annexes")
                        .route("", web::get().to(annex_handler::list_annexes_endpoint))
                        .route("", web::post().to(annex_handler::create_annex_endpoint))
                        .route("/{id}", web::get().to(annex_handler::get_annex_endpoint))
                        .route("/{id}", web::patch().to(annex_handler::modify_annex_endpoint))
                        .route("/{id}", web::delete().to(annex_handler::delete_annex_endpoint)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::get().to(user_handler::list_users_endpoint))
                        .route("", web::post().to(user_handler::create_user_endpoint))
                        .route("/{id}", web::get().to(user_handler::get_user_endpoint))
                        .route("/{id}", web::patch().to(user_handler::modify_user_endpoint))
                        .route("/{id}", web::delete().to(user_handler::delete_user_endpoint)),
                )
                .service(
                    web::scope("/groups")
                        .route("", web::get().to(group_handler::list_groups_endpoint))
                        .route("", web::post().to(group_handler::create_group_endpoint))
                        .route("/{id}", web::get().to(group_handler::get_group_endpoint))
                        .route("/{id}", web::delete().to(group_handler::delete_group_endpoint))
                        .route(
                            "/{id}/members",
                            web::get().to(group_handler::list_members_endpoint),
                        )
                        .route(
                            "/{id}/members",
                            web::post().to(group_handler::add_member_endpoint),
                        )
                        .route(
                            "/{id}/members/{user_id}",
                            web::delete().to(group_handler::remove_member_endpoint),
                        ),
                ),
        );
}

/// Cuerpos JSON mal formados responden 400 con el mismo formato que el resto
/// de errores.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({ "error": "Invalid JSON body", "details": err.to_string() });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let body = json!({ "error": "Invalid query string", "details": err.to_string() });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}
