//! services/enrollment_service.rs
//! Inscripciones: liga alumno + pago + usuario emisor.

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::auth_model::AuthUser;
use crate::models::enrollment_model::{
    CreateEnrollmentRequest, EnrollmentData, EnrollmentDetail, EnrollmentFilter,
    EnrollmentRecord, ModifyEnrollmentRequest,
};
use crate::models::page_model::{Page, PaginationQuery};
use crate::services::{
    ensure_exists, payment_service::PaymentService, student_service::StudentService,
    user_service::UserService,
};

const ENROLLMENT_COLUMNS: &str =
    "id, factura, tipo_inscripcion, modalidad_pago, alumno_id, pago_id, usuario_id";

#[derive(Clone, Debug)]
pub struct EnrollmentService {
    db_pool: Pool<Sqlite>,
    student_service: StudentService,
    payment_service: PaymentService,
    user_service: UserService,
}

impl EnrollmentService {
    pub fn new(
        db_pool: Pool<Sqlite>,
        student_service: StudentService,
        payment_service: PaymentService,
        user_service: UserService,
    ) -> Self {
        EnrollmentService {
            db_pool,
            student_service,
            payment_service,
            user_service,
        }
    }

    pub async fn list_enrollments(
        &self,
        filter: &EnrollmentFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<EnrollmentRecord>> {
        let mut count_qb =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM inscripciones WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM inscripciones WHERE 1 = 1",
            ENROLLMENT_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<EnrollmentRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_enrollment(&self, id: i64) -> AppResult<EnrollmentRecord> {
        let sql = format!("SELECT {} FROM inscripciones WHERE id = ?1", ENROLLMENT_COLUMNS);
        sqlx::query_as::<_, EnrollmentRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Inscripción", id))
    }

    /// Inscripción con alumno, pago y usuario anidados
    pub async fn get_enrollment_detail(&self, id: i64) -> AppResult<EnrollmentDetail> {
        let record = self.get_enrollment(id).await?;
        let alumno = self.student_service.get_student(record.alumno_id).await?;
        let pago = self.payment_service.get_payment(record.pago_id).await?;
        let usuario = self.user_service.get_user(record.usuario_id).await?;

        Ok(EnrollmentDetail {
            id: record.id,
            factura: record.factura,
            tipo_inscripcion: record.tipo_inscripcion,
            modalidad_pago: record.modalidad_pago,
            alumno,
            pago,
            usuario,
        })
    }

    /// Sin `usuario_id`, el emisor es quien hace la petición.
    pub async fn create_enrollment(
        &self,
        issuer: &AuthUser,
        req: CreateEnrollmentRequest,
    ) -> AppResult<EnrollmentDetail> {
        let data = req.with_issuer(issuer.id);
        data.validate()?;
        let data = data.normalized();
        self.ensure_references(&data).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO inscripciones (
                factura, tipo_inscripcion, modalidad_pago, alumno_id, pago_id, usuario_id
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(data.factura)
        .bind(&data.tipo_inscripcion)
        .bind(&data.modalidad_pago)
        .bind(data.alumno_id)
        .bind(data.pago_id)
        .bind(data.usuario_id)
        .execute(&self.db_pool)
        .await?;

        let id = result.last_insert_rowid();
        log::info!(
            "(create_enrollment) Inscripción id={} alumno_id={} pago_id={} emitida por usuario_id={}",
            id,
            data.alumno_id,
            data.pago_id,
            data.usuario_id
        );
        self.get_enrollment_detail(id).await
    }

    pub async fn modify_enrollment(
        &self,
        id: i64,
        patch: ModifyEnrollmentRequest,
    ) -> AppResult<EnrollmentDetail> {
        let current = self.get_enrollment(id).await?;
        if patch.is_empty() {
            return self.get_enrollment_detail(id).await;
        }

        let merged = patch.apply_to(current);
        merged.validate()?;
        let merged = merged.normalized();
        self.ensure_references(&merged).await?;

        sqlx::query(
            r#"
            UPDATE inscripciones
            SET factura = ?2,
                tipo_inscripcion = ?3,
                modalidad_pago = ?4,
                alumno_id = ?5,
                pago_id = ?6,
                usuario_id = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(merged.factura)
        .bind(&merged.tipo_inscripcion)
        .bind(&merged.modalidad_pago)
        .bind(merged.alumno_id)
        .bind(merged.pago_id)
        .bind(merged.usuario_id)
        .execute(&self.db_pool)
        .await?;

        log::info!("(modify_enrollment) Inscripción id={} actualizada", id);
        self.get_enrollment_detail(id).await
    }

    pub async fn delete_enrollment(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inscripciones WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Inscripción", id));
        }
        log::info!("(delete_enrollment) Inscripción id={} eliminada", id);
        Ok(())
    }

    async fn ensure_references(&self, data: &EnrollmentData) -> AppResult<()> {
        ensure_exists(&self.db_pool, "alumnos", "alumno_id", data.alumno_id).await?;
        ensure_exists(&self.db_pool, "pagos", "pago_id", data.pago_id).await?;
        ensure_exists(&self.db_pool, "users", "usuario_id", data.usuario_id).await?;
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &EnrollmentFilter) {
    if let Some(alumno_id) = filter.alumno_id {
        qb.push(" AND alumno_id = ").push_bind(alumno_id);
    }
    if let Some(pago_id) = filter.pago_id {
        qb.push(" AND pago_id = ").push_bind(pago_id);
    }
    if let Some(usuario_id) = filter.usuario_id {
        qb.push(" AND usuario_id = ").push_bind(usuario_id);
    }
    if let Some(factura) = filter.factura {
        qb.push(" AND factura = ").push_bind(factura);
    }
    if let Some(tipo) = &filter.tipo_inscripcion {
        qb.push(" AND tipo_inscripcion = ")
            .push_bind(tipo.trim().to_string());
    }
}
