//! services/tutor_service.rs

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::page_model::{Page, PaginationQuery};
use crate::models::tutor_model::{CreateTutorRequest, ModifyTutorRequest, TutorFilter, TutorRecord};
use crate::services::{ensure_exists, like_pattern};

const TUTOR_COLUMNS: &str = "id, nombre_padre_tutor, curp_tutor, scan_ine, telefono, \
     scan_comprobante_domicilio, email_padre_tutor, alumno_id";

#[derive(Clone, Debug)]
pub struct TutorService {
    db_pool: Pool<Sqlite>,
}

impl TutorService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        TutorService { db_pool }
    }

    pub async fn list_tutors(
        &self,
        filter: &TutorFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<TutorRecord>> {
        let mut count_qb =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM padres_tutores WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM padres_tutores WHERE 1 = 1",
            TUTOR_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY nombre_padre_tutor, id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<TutorRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_tutor(&self, id: i64) -> AppResult<TutorRecord> {
        let sql = format!("SELECT {} FROM padres_tutores WHERE id = ?1", TUTOR_COLUMNS);
        sqlx::query_as::<_, TutorRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Tutor", id))
    }

    pub async fn create_tutor(&self, req: CreateTutorRequest) -> AppResult<TutorRecord> {
        req.validate()?;
        let req = req.normalized();
        ensure_exists(&self.db_pool, "alumnos", "alumno_id", req.alumno_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO padres_tutores (
                nombre_padre_tutor, curp_tutor, scan_ine, telefono,
                scan_comprobante_domicilio, email_padre_tutor, alumno_id
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&req.nombre_padre_tutor)
        .bind(&req.curp_tutor)
        .bind(&req.scan_ine)
        .bind(&req.telefono)
        .bind(&req.scan_comprobante_domicilio)
        .bind(&req.email_padre_tutor)
        .bind(req.alumno_id)
        .execute(&self.db_pool)
        .await?;

        let id = result.last_insert_rowid();
        log::info!(
            "(create_tutor) Tutor creado id={} para alumno_id={}",
            id,
            req.alumno_id
        );
        self.get_tutor(id).await
    }

    pub async fn modify_tutor(&self, id: i64, patch: ModifyTutorRequest) -> AppResult<TutorRecord> {
        let current = self.get_tutor(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let reassigns_student = patch.alumno_id.is_some_and(|a| a != current.alumno_id);
        let merged = patch.apply_to(current);
        merged.validate()?;
        let merged = merged.normalized();
        if reassigns_student {
            ensure_exists(&self.db_pool, "alumnos", "alumno_id", merged.alumno_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE padres_tutores
            SET nombre_padre_tutor = ?2,
                curp_tutor = ?3,
                scan_ine = ?4,
                telefono = ?5,
                scan_comprobante_domicilio = ?6,
                email_padre_tutor = ?7,
                alumno_id = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&merged.nombre_padre_tutor)
        .bind(&merged.curp_tutor)
        .bind(&merged.scan_ine)
        .bind(&merged.telefono)
        .bind(&merged.scan_comprobante_domicilio)
        .bind(&merged.email_padre_tutor)
        .bind(merged.alumno_id)
        .execute(&self.db_pool)
        .await?;

        log::info!("(modify_tutor) Tutor id={} actualizado", id);
        self.get_tutor(id).await
    }

    pub async fn delete_tutor(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM padres_tutores WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Tutor", id));
        }
        log::info!("(delete_tutor) Tutor id={} eliminado", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TutorFilter) {
    if let Some(alumno_id) = filter.alumno_id {
        qb.push(" AND alumno_id = ").push_bind(alumno_id);
    }
    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        qb.push(" AND nombre_padre_tutor LIKE ")
            .push_bind(like_pattern(q))
            .push(" ESCAPE '\\'");
    }
}
