//! tests/api_tests.rs
//! Pruebas HTTP de punta a punta con `actix_web::test`.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test as http, App};
    use serde_json::{json, Value};

    use crate::app::init_app;
    use crate::tests::fixtures::{setup, ADMIN_PASSWORD, ADMIN_USERNAME};

    macro_rules! test_app {
        ($services:expr) => {{
            let services = $services.clone();
            http::init_service(
                App::new()
                    .configure(move |cfg| services.register(cfg))
                    .configure(init_app),
            )
            .await
        }};
    }

    macro_rules! login {
        ($app:expr, $username:expr, $password:expr) => {{
            let req = http::TestRequest::post()
                .uri("/api/auth/token")
                .set_json(json!({ "username": $username, "password": $password }))
                .to_request();
            let body: Value = http::call_and_read_body_json(&$app, req).await;
            format!("Bearer {}", body["token"].as_str().unwrap())
        }};
    }

    fn student_body(curp: &str) -> Value {
        json!({
            "nombre": "Ana",
            "apellido_paterno": "Gómez",
            "apellido_materno": "Ruiz",
            "correo_institucional": "ana.gomez@escuela.edu.mx",
            "curp": curp,
            "sexo": "M",
            "escuela_procedencia": "Primaria Benito Juárez",
            "grado_grupo_asignado": "1A"
        })
    }

    #[test]
    async fn endpoints_require_token() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);

        let req = http::TestRequest::get().uri("/api/students").to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = http::read_body_json(resp).await;
        assert_eq!(body["error"], "Unauthorized");

        let req = http::TestRequest::get()
            .uri("/api/students")
            .insert_header((header::AUTHORIZATION, "Bearer token.falso.x"))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    async fn login_with_wrong_password_is_401() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);

        let req = http::TestRequest::post()
            .uri("/api/auth/token")
            .set_json(json!({ "username": ADMIN_USERNAME, "password": "mala" }))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    async fn verify_refresh_and_me() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);
        let bearer = login!(app, ADMIN_USERNAME, ADMIN_PASSWORD);
        let token = bearer.trim_start_matches("Bearer ").to_string();

        let req = http::TestRequest::post()
            .uri("/api/auth/verify")
            .set_json(json!({ "token": token }))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["payload"]["username"], ADMIN_USERNAME);

        let req = http::TestRequest::post()
            .uri("/api/auth/refresh")
            .set_json(json!({ "token": token }))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert!(body["token"].is_string());
        assert!(body["refresh_expires_in"].is_i64());

        let req = http::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["username"], ADMIN_USERNAME);
        assert_eq!(body["is_superuser"], true);
        assert!(body["groups"].is_array());
    }

    #[test]
    async fn student_crud_over_http() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);
        let bearer = login!(app, ADMIN_USERNAME, ADMIN_PASSWORD);

        let req = http::TestRequest::post()
            .uri("/api/students")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(student_body("goma010203mdfrrna5"))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = http::read_body_json(resp).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["curp"], "GOMA010203MDFRRNA5");

        let req = http::TestRequest::patch()
            .uri(&format!("/api/students/{}", id))
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({ "grado_grupo_asignado": "2B" }))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["grado_grupo_asignado"], "2B");
        assert_eq!(body["nombre"], "Ana");

        let req = http::TestRequest::get()
            .uri("/api/students?q=ana&page=1&page_size=5")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["page_size"], 5);
        assert_eq!(body["items"][0]["id"], id);

        let req = http::TestRequest::delete()
            .uri(&format!("/api/students/{}", id))
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], id);

        let req = http::TestRequest::get()
            .uri(&format!("/api/students/{}", id))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    async fn invalid_payloads_are_400() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);
        let bearer = login!(app, ADMIN_USERNAME, ADMIN_PASSWORD);

        let req = http::TestRequest::post()
            .uri("/api/students")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(student_body("CORTA"))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = http::read_body_json(resp).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "curp");

        // Falta un campo obligatorio
        let req = http::TestRequest::post()
            .uri("/api/payments")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({ "recibo": "https://x.mx/r.pdf", "monto": 10.0 }))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = http::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid JSON body");

        let req = http::TestRequest::get()
            .uri("/api/payments?fecha_desde=ayer")
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    async fn enrollment_over_http_nests_related_records() {
        let ctx = setup().await;
        let app = test_app!(ctx.services);
        let bearer = login!(app, ADMIN_USERNAME, ADMIN_PASSWORD);

        let req = http::TestRequest::post()
            .uri("/api/students")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(student_body("GOMA010203MDFRRNA5"))
            .to_request();
        let student: Value = http::call_and_read_body_json(&app, req).await;

        let req = http::TestRequest::post()
            .uri("/api/payments")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({
                "recibo": "https://files.escuela.edu.mx/recibos/1.pdf",
                "descuento": 0,
                "id_recibo": 1,
                "monto": 3200.0,
                "fecha_pago": "2024-08-15",
                "metodo_pago": "03"
            }))
            .to_request();
        let payment: Value = http::call_and_read_body_json(&app, req).await;

        let req = http::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({
                "tipo_inscripcion": "NUEVO",
                "modalidad_pago": "A",
                "alumno_id": student["id"],
                "pago_id": payment["id"]
            }))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let enrollment: Value = http::read_body_json(resp).await;
        assert_eq!(enrollment["alumno"]["curp"], "GOMA010203MDFRRNA5");
        assert_eq!(enrollment["pago"]["fecha_pago"], "2024-08-15");
        assert_eq!(enrollment["usuario"]["username"], ADMIN_USERNAME);
        assert_eq!(enrollment["factura"], false);

        let req = http::TestRequest::get()
            .uri(&format!(
                "/api/enrollments?alumno_id={}",
                student["id"].as_i64().unwrap()
            ))
            .insert_header((header::AUTHORIZATION, bearer))
            .to_request();
        let body: Value = http::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
    }

    #[test]
    async fn staff_cannot_create_users_over_http() {
        let ctx = setup().await;
        crate::tests::fixtures::create_staff(&ctx, "capturista").await;
        let app = test_app!(ctx.services);
        let bearer = login!(app, "capturista", "password-123");

        let req = http::TestRequest::post()
            .uri("/api/users")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({
                "username": "otro",
                "password": "password-456",
                "email": "otro@escuela.edu.mx"
            }))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = http::TestRequest::post()
            .uri("/api/groups")
            .insert_header((header::AUTHORIZATION, bearer))
            .set_json(json!({ "name": "Caja" }))
            .to_request();
        let resp = http::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
