//! tests/auth_tests.rs
//! Pruebas de emisión, verificación y refresco de tokens.

#[cfg(test)]
mod tests {
    use actix_rt::test;
    use chrono::Utc;

    use crate::config::app_config::JwtConfig;
    use crate::error::AppError;
    use crate::models::user_model::ModifyUserRequest;
    use crate::services::auth_service::{hash_password, verify_password, AuthService, DUMMY_HASH};
    use crate::tests::fixtures::{create_staff, setup, ADMIN_PASSWORD, ADMIN_USERNAME};

    #[test]
    async fn password_hash_roundtrip() {
        let hash = hash_password("clave-segura-1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("clave-segura-1", &hash));
        assert!(!verify_password("otra-clave", &hash));
        assert!(!verify_password("clave-segura-1", "no-es-un-hash"));
    }

    #[test]
    async fn token_auth_issues_verifiable_token() {
        let ctx = setup().await;
        let auth = &ctx.services.auth;

        let resp = auth.token_auth(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(resp.payload.username, ADMIN_USERNAME);
        assert_eq!(resp.payload.user_id, ctx.admin.id);
        assert_eq!(resp.payload.exp - resp.payload.orig_iat, ctx.jwt.expiration_secs);
        assert_eq!(
            resp.refresh_expires_in,
            resp.payload.orig_iat + ctx.jwt.refresh_expiration_secs
        );

        let verified = auth.verify_token(&resp.token).unwrap();
        assert_eq!(verified.payload, resp.payload);

        let user = auth.authenticate(&resp.token).await.unwrap();
        assert_eq!(user, ctx.admin);

        let admin = ctx.services.users.get_user(ctx.admin.id).await.unwrap();
        assert!(admin.last_login.is_some());
    }

    #[test]
    async fn token_auth_rejects_bad_credentials_uniformly() {
        let ctx = setup().await;
        let auth = &ctx.services.auth;

        let wrong_password = auth.token_auth(ADMIN_USERNAME, "incorrecta").await;
        let unknown_user = auth.token_auth("nadie", "incorrecta").await;

        match (wrong_password, unknown_user) {
            (Err(AppError::Unauthorized(a)), Err(AppError::Unauthorized(b))) => assert_eq!(a, b),
            other => panic!("se esperaban dos 401, llegó {:?}", other),
        }
    }

    #[test]
    async fn inactive_user_cannot_log_in_or_use_old_token() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        let auth = &ctx.services.auth;
        let token = auth.token_auth("capturista", "password-123").await.unwrap().token;

        ctx.services
            .users
            .modify_user(
                &ctx.admin,
                staff.id,
                ModifyUserRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            auth.token_auth("capturista", "password-123").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            auth.authenticate(&token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    async fn refresh_rejects_deactivated_or_deleted_user() {
        let ctx = setup().await;
        let auth = &ctx.services.auth;
        let staff = create_staff(&ctx, "capturista").await;
        let cajero = create_staff(&ctx, "cajero").await;
        let staff_token = auth.token_auth("capturista", "password-123").await.unwrap().token;
        let cajero_token = auth.token_auth("cajero", "password-123").await.unwrap().token;

        assert!(auth.refresh_token(&staff_token).await.is_ok());

        ctx.services
            .users
            .modify_user(
                &ctx.admin,
                staff.id,
                ModifyUserRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            auth.refresh_token(&staff_token).await,
            Err(AppError::Unauthorized(_))
        ));

        ctx.services
            .users
            .delete_user(&ctx.admin, cajero.id)
            .await
            .unwrap();
        assert!(matches!(
            auth.refresh_token(&cajero_token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    async fn unknown_user_is_checked_against_real_argon2_hash() {
        let dummy = (*DUMMY_HASH).clone().expect("hash fijo disponible");
        assert!(dummy.starts_with("$argon2"));
        assert!(!verify_password("cualquier-clave", &dummy));

        let ctx = setup().await;
        assert!(matches!(
            ctx.services.auth.token_auth("nadie", "cualquier-clave").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    async fn token_from_other_secret_is_rejected() {
        let ctx = setup().await;
        let token = ctx
            .services
            .auth
            .token_auth(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .unwrap()
            .token;

        let other = AuthService::new(
            ctx.services.users.clone(),
            &JwtConfig {
                secret: "otro-secreto".to_string(),
                ..JwtConfig::default()
            },
        );
        assert!(matches!(
            other.verify_token(&token),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            ctx.services.auth.verify_token("basura"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    async fn refresh_keeps_orig_iat_within_window() {
        let ctx = setup().await;
        let auth = &ctx.services.auth;
        let first = auth.token_auth(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

        let now = Utc::now().timestamp() + 10;
        let refreshed = auth.refresh_token_at(&first.token, now).await.unwrap();

        assert_ne!(refreshed.token, first.token);
        assert_eq!(refreshed.payload.orig_iat, first.payload.orig_iat);
        assert_eq!(refreshed.payload.exp, now + ctx.jwt.expiration_secs);
        assert_eq!(refreshed.refresh_expires_in, first.refresh_expires_in);
    }

    #[test]
    async fn refresh_fails_after_window() {
        let ctx = setup().await;
        // Ventana de refresco más corta que la vigencia para poder probarla
        let auth = AuthService::new(
            ctx.services.users.clone(),
            &JwtConfig {
                secret: ctx.jwt.secret.clone(),
                expiration_secs: 3600,
                refresh_expiration_secs: 60,
            },
        );
        let first = auth.token_auth(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();

        let late = first.payload.orig_iat + 61;
        assert!(matches!(
            auth.refresh_token_at(&first.token, late).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(auth
            .refresh_token_at(&first.token, first.payload.orig_iat + 60)
            .await
            .is_ok());
    }

    #[test]
    async fn expired_token_is_rejected() {
        let ctx = setup().await;
        let auth = AuthService::new(
            ctx.services.users.clone(),
            &JwtConfig {
                secret: ctx.jwt.secret.clone(),
                expiration_secs: -10,
                refresh_expiration_secs: 600,
            },
        );
        let token = auth
            .token_auth(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .unwrap()
            .token;

        assert!(matches!(
            auth.verify_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
