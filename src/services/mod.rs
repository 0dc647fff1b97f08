//! services/mod.rs
//! Módulo que agrupa los "servicios" o "capas de negocio" de la app.

pub mod annex_service;
pub mod auth_service;
pub mod enrollment_service;
pub mod group_service;
pub mod payment_service;
pub mod student_service;
pub mod tutor_service;
pub mod user_service;

use actix_web::web;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::JwtConfig;
use crate::error::AppResult;
use crate::validation::ValidationErrors;

use annex_service::AnnexService;
use auth_service::AuthService;
use enrollment_service::EnrollmentService;
use group_service::GroupService;
use payment_service::PaymentService;
use student_service::StudentService;
use tutor_service::TutorService;
use user_service::UserService;

/// Todos los servicios, listos para registrarse como `web::Data`.
#[derive(Clone)]
pub struct Services {
    pub students: StudentService,
    pub payments: PaymentService,
    pub tutors: TutorService,
    pub enrollments: EnrollmentService,
    pub annexes: AnnexService,
    pub users: UserService,
    pub groups: GroupService,
    pub auth: AuthService,
}

impl Services {
    pub fn new(db_pool: Pool<Sqlite>, jwt: &JwtConfig) -> Self {
        let students = StudentService::new(db_pool.clone());
        let payments = PaymentService::new(db_pool.clone());
        let users = UserService::new(db_pool.clone());
        let enrollments = EnrollmentService::new(
            db_pool.clone(),
            students.clone(),
            payments.clone(),
            users.clone(),
        );

        Services {
            tutors: TutorService::new(db_pool.clone()),
            annexes: AnnexService::new(db_pool.clone()),
            groups: GroupService::new(db_pool),
            auth: AuthService::new(users.clone(), jwt),
            students,
            payments,
            enrollments,
            users,
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.students.clone()))
            .app_data(web::Data::new(self.payments.clone()))
            .app_data(web::Data::new(self.tutors.clone()))
            .app_data(web::Data::new(self.enrollments.clone()))
            .app_data(web::Data::new(self.annexes.clone()))
            .app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.groups.clone()))
            .app_data(web::Data::new(self.auth.clone()));
    }
}

/// Patrón para `LIKE ... ESCAPE '\'` que busca `q` como subcadena literal.
/// `LIKE` de SQLite ignora mayúsculas solo en ASCII: `ana` encuentra `Ana`,
/// pero `ángel` no encuentra `Ángel`.
pub(crate) fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Falla con error de validación sobre `field` si no existe la fila `id` en
/// `table`.
pub(crate) async fn ensure_exists(
    db_pool: &Pool<Sqlite>,
    table: &'static str,
    field: &str,
    id: i64,
) -> AppResult<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
    let (exists,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(db_pool).await?;
    if exists {
        Ok(())
    } else {
        Err(ValidationErrors::single(field, format!("no existe un registro con id {}", id)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_x"), "%50\\%\\_x%");
    }
}
