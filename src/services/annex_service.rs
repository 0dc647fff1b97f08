//! services/annex_service.rs

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::annex_model::{AnnexFilter, AnnexRecord, CreateAnnexRequest, ModifyAnnexRequest};
use crate::models::page_model::{Page, PaginationQuery};
use crate::services::ensure_exists;

const ANNEX_COLUMNS: &str = "id, carta_buena_conducta, certificado_primaria, curp_alumno, \
     acta_nacimiento, observaciones, cda, autorizacion_irse_solo, autorizacion_publicitaria, \
     atencion_psicologica, padecimiento, uso_aparato_auditivo, uso_de_lentes, lateralidad, \
     alumno_id";

const DOCUMENTOS_COMPLETOS_SQL: &str =
    "(carta_buena_conducta = 1 AND certificado_primaria = 1 AND curp_alumno = 1 AND acta_nacimiento = 1)";

#[derive(Clone, Debug)]
pub struct AnnexService {
    db_pool: Pool<Sqlite>,
}

impl AnnexService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        AnnexService { db_pool }
    }

    pub async fn list_annexes(
        &self,
        filter: &AnnexFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<AnnexRecord>> {
        let mut count_qb =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM anexos_alumnos WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM anexos_alumnos WHERE 1 = 1",
            ANNEX_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY alumno_id, id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<AnnexRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_annex(&self, id: i64) -> AppResult<AnnexRecord> {
        let sql = format!("SELECT {} FROM anexos_alumnos WHERE id = ?1", ANNEX_COLUMNS);
        sqlx::query_as::<_, AnnexRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Anexo", id))
    }

    pub async fn create_annex(&self, req: CreateAnnexRequest) -> AppResult<AnnexRecord> {
        req.validate()?;
        let req = req.normalized();
        ensure_exists(&self.db_pool, "alumnos", "alumno_id", req.alumno_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO anexos_alumnos (
                carta_buena_conducta, certificado_primaria, curp_alumno, acta_nacimiento,
                observaciones, cda, autorizacion_irse_solo, autorizacion_publicitaria,
                atencion_psicologica, padecimiento, uso_aparato_auditivo, uso_de_lentes,
                lateralidad, alumno_id
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(req.carta_buena_conducta)
        .bind(req.certificado_primaria)
        .bind(req.curp_alumno)
        .bind(req.acta_nacimiento)
        .bind(&req.observaciones)
        .bind(&req.cda)
        .bind(req.autorizacion_irse_solo)
        .bind(req.autorizacion_publicitaria)
        .bind(req.atencion_psicologica)
        .bind(&req.padecimiento)
        .bind(req.uso_aparato_auditivo)
        .bind(req.uso_de_lentes)
        .bind(&req.lateralidad)
        .bind(req.alumno_id)
        .execute(&self.db_pool)
        .await?;

        let annex = self.get_annex(result.last_insert_rowid()).await?;
        log::info!(
            "(create_annex) Anexo creado id={} para alumno_id={} documentos_completos={}",
            annex.id,
            annex.alumno_id,
            annex.documentos_completos()
        );
        Ok(annex)
    }

    pub async fn modify_annex(&self, id: i64, patch: ModifyAnnexRequest) -> AppResult<AnnexRecord> {
        let current = self.get_annex(id).await?;
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
            UPDATE anexos_alumnos
            SET carta_buena_conducta = ?2,
                certificado_primaria = ?3,
                curp_alumno = ?4,
                acta_nacimiento = ?5,
                observaciones = ?6,
                cda = ?7,
                autorizacion_irse_solo = ?8,
                autorizacion_publicitaria = ?9,
                atencion_psicologica = ?10,
                padecimiento = ?11,
                uso_aparato_auditivo = ?12,
                uso_de_lentes = ?13,
                lateralidad = ?14,
                alumno_id = ?15
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(merged.carta_buena_conducta)
        .bind(merged.certificado_primaria)
        .bind(merged.curp_alumno)
        .bind(merged.acta_nacimiento)
        .bind(&merged.observaciones)
        .bind(&merged.cda)
        .bind(merged.autorizacion_irse_solo)
        .bind(merged.autorizacion_publicitaria)
        .bind(merged.atencion_psicologica)
        .bind(&merged.padecimiento)
        .bind(merged.uso_aparato_auditivo)
        .bind(merged.uso_de_lentes)
        .bind(&merged.lateralidad)
        .bind(merged.alumno_id)
        .execute(&self.db_pool)
        .await?;

        let annex = self.get_annex(id).await?;
        log::info!(
            "(modify_annex) Anexo id={} actualizado documentos_completos={}",
            id,
            annex.documentos_completos()
        );
        Ok(annex)
    }

    pub async fn delete_annex(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM anexos_alumnos WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Anexo", id));
        }
        log::info!("(delete_annex) Anexo id={} eliminado", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &AnnexFilter) {
    if let Some(alumno_id) = filter.alumno_id {
        qb.push(" AND alumno_id = ").push_bind(alumno_id);
    }
    if let Some(atencion) = filter.atencion_psicologica {
        qb.push(" AND atencion_psicologica = ").push_bind(atencion);
    }
    match filter.documentos_completos {
        Some(true) => {
            qb.push(" AND ").push(DOCUMENTOS_COMPLETOS_SQL);
        }
        Some(false) => {
            qb.push(" AND NOT ").push(DOCUMENTOS_COMPLETOS_SQL);
        }
        None => {}
    }
}
