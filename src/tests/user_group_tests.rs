//! tests/user_group_tests.rs
//! Pruebas de usuarios, grupos y permisos de superusuario.

#[cfg(test)]
mod tests {
    use actix_rt::test;

    use crate::config::app_config::BootstrapAdmin;
    use crate::error::AppError;
    use crate::models::group_model::CreateGroupRequest;
    use crate::models::page_model::PaginationQuery;
    use crate::models::user_model::{CreateUserRequest, ModifyUserRequest, UserFilter};
    use crate::tests::fixtures::{
        create_staff, enrollment_request, payment_request, setup, student_request,
        ADMIN_USERNAME,
    };

    #[test]
    async fn bootstrap_admin_is_created_once() {
        let ctx = setup().await;
        let created = ctx
            .services
            .users
            .ensure_superuser(&BootstrapAdmin {
                username: ADMIN_USERNAME.to_string(),
                email: "otro@escuela.edu.mx".to_string(),
                password: "otra-clave-1".to_string(),
            })
            .await
            .unwrap();
        assert!(!created);

        let admin = ctx.services.users.get_user(ctx.admin.id).await.unwrap();
        assert!(admin.is_superuser);
        assert_eq!(admin.email, "admin@escuela.edu.mx");
    }

    #[test]
    async fn only_superusers_manage_users() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        let users = &ctx.services.users;

        let result = users
            .create_user(
                &staff,
                CreateUserRequest {
                    username: "intruso".to_string(),
                    password: "password-123".to_string(),
                    email: "intruso@example.com".to_string(),
                    is_superuser: true,
                    is_staff: false,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        assert!(matches!(
            users.delete_user(&staff, ctx.admin.id).await,
            Err(AppError::Forbidden(_))
        ));

        // Escalar privilegios sobre sí mismo tampoco
        let result = users
            .modify_user(
                &staff,
                staff.id,
                ModifyUserRequest {
                    is_superuser: Some(true),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    async fn user_can_change_own_email() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;

        let detail = ctx
            .services
            .users
            .modify_user(
                &staff,
                staff.id,
                ModifyUserRequest {
                    email: Some("nuevo@escuela.edu.mx".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(detail.user.email, "nuevo@escuela.edu.mx");
        assert!(!detail.user.is_superuser);
    }

    #[test]
    async fn duplicate_username_is_conflict() {
        let ctx = setup().await;
        create_staff(&ctx, "capturista").await;

        let result = ctx
            .services
            .users
            .create_user(
                &ctx.admin,
                CreateUserRequest {
                    username: "capturista".to_string(),
                    password: "password-456".to_string(),
                    email: "otro@escuela.edu.mx".to_string(),
                    is_superuser: false,
                    is_staff: false,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    async fn create_user_validates_password_and_username() {
        let ctx = setup().await;
        let result = ctx
            .services
            .users
            .create_user(
                &ctx.admin,
                CreateUserRequest {
                    username: "con espacios".to_string(),
                    password: "12345678".to_string(),
                    email: "x@escuela.edu.mx".to_string(),
                    is_superuser: false,
                    is_staff: false,
                },
            )
            .await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert!(errors.has_field("username"));
                assert!(errors.has_field("password"));
                assert!(!errors.has_field("email"));
            }
            other => panic!("se esperaba error de validación, llegó {:?}", other),
        }
    }

    #[test]
    async fn superuser_cannot_delete_itself() {
        let ctx = setup().await;
        let result = ctx.services.users.delete_user(&ctx.admin, ctx.admin.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    async fn deleting_user_removes_enrollments_they_issued() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        let alumno = ctx
            .services
            .students
            .create_student(student_request("Ana", "GOMA010203MDFRRNA5"))
            .await
            .unwrap();
        let pago = ctx
            .services
            .payments
            .create_payment(payment_request(1, 3200.0))
            .await
            .unwrap();
        let enrollment = ctx
            .services
            .enrollments
            .create_enrollment(&staff, enrollment_request(alumno.id, pago.id))
            .await
            .unwrap();
        assert_eq!(enrollment.usuario.id, staff.id);

        ctx.services
            .users
            .delete_user(&ctx.admin, staff.id)
            .await
            .unwrap();

        assert!(matches!(
            ctx.services.users.get_user(staff.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            ctx.services.enrollments.get_enrollment(enrollment.id).await,
            Err(AppError::NotFound { .. })
        ));
        // Alumno y pago no dependen del usuario
        assert!(ctx.services.students.get_student(alumno.id).await.is_ok());
        assert!(ctx.services.payments.get_payment(pago.id).await.is_ok());
    }

    #[test]
    async fn list_users_filters_by_text_and_status() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        create_staff(&ctx, "cajero").await;
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

        let users = &ctx.services.users;
        let page = users
            .list_users(&UserFilter::default(), &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 3);

        let active = UserFilter {
            is_active: Some(true),
            ..Default::default()
        };
        let page = users
            .list_users(&active, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);

        let text = UserFilter {
            q: Some("caj".to_string()),
            ..Default::default()
        };
        let page = users
            .list_users(&text, &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].username, "cajero");
    }

    #[test]
    async fn group_membership_lifecycle() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        let groups = &ctx.services.groups;

        let group = groups
            .create_group(
                &ctx.admin,
                CreateGroupRequest {
                    name: " Control Escolar ".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(group.name, "Control Escolar");

        groups.add_member(&ctx.admin, group.id, staff.id).await.unwrap();
        // Agregar dos veces no duplica
        groups.add_member(&ctx.admin, group.id, staff.id).await.unwrap();

        let members = groups.list_members(group.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, staff.id);

        let detail = ctx.services.users.get_user_detail(staff.id).await.unwrap();
        assert_eq!(detail.groups, vec!["Control Escolar".to_string()]);

        groups
            .remove_member(&ctx.admin, group.id, staff.id)
            .await
            .unwrap();
        assert!(matches!(
            groups.remove_member(&ctx.admin, group.id, staff.id).await,
            Err(AppError::NotFound { .. })
        ));

        groups.delete_group(&ctx.admin, group.id).await.unwrap();
        assert!(groups.list_groups().await.unwrap().is_empty());
    }

    #[test]
    async fn group_rules() {
        let ctx = setup().await;
        let staff = create_staff(&ctx, "capturista").await;
        let groups = &ctx.services.groups;

        let result = groups
            .create_group(
                &staff,
                CreateGroupRequest {
                    name: "Caja".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let caja = groups
            .create_group(
                &ctx.admin,
                CreateGroupRequest {
                    name: "Caja".to_string(),
                },
            )
            .await
            .unwrap();
        let duplicate = groups
            .create_group(
                &ctx.admin,
                CreateGroupRequest {
                    name: "Caja".to_string(),
                },
            )
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let missing_user = groups.add_member(&ctx.admin, caja.id, 9999).await;
        assert!(matches!(missing_user, Err(AppError::Validation(e)) if e.has_field("user_id")));

        assert!(matches!(
            groups.add_member(&ctx.admin, 9999, staff.id).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
