//! services/student_service.rs
//! Alta, consulta, modificación y baja de alumnos.

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::page_model::{Page, PaginationQuery};
use crate::models::student_model::{
    CreateStudentRequest, ModifyStudentRequest, StudentFilter, StudentRecord,
};
use crate::services::like_pattern;

const STUDENT_COLUMNS: &str = "id, nombre, apellido_paterno, apellido_materno, \
     correo_institucional, curp, sexo, escuela_procedencia, grado_grupo_asignado";

#[derive(Clone, Debug)]
pub struct StudentService {
    db_pool: Pool<Sqlite>,
}

impl StudentService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        StudentService { db_pool }
    }

    /// Lista alumnos con filtros opcionales y paginación
    pub async fn list_students(
        &self,
        filter: &StudentFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<StudentRecord>> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM alumnos WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM alumnos WHERE 1 = 1",
            STUDENT_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY apellido_paterno, apellido_materno, nombre, id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<StudentRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_student(&self, id: i64) -> AppResult<StudentRecord> {
        let sql = format!("SELECT {} FROM alumnos WHERE id = ?1", STUDENT_COLUMNS);
        sqlx::query_as::<_, StudentRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Alumno", id))
    }

    pub async fn create_student(&self, req: CreateStudentRequest) -> AppResult<StudentRecord> {
        req.validate()?;
        let req = req.normalized();

        let result = sqlx::query(
            r#"
            INSERT INTO alumnos (
                nombre, apellido_paterno, apellido_materno, correo_institucional,
                curp, sexo, escuela_procedencia, grado_grupo_asignado
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&req.nombre)
        .bind(&req.apellido_paterno)
        .bind(&req.apellido_materno)
        .bind(&req.correo_institucional)
        .bind(&req.curp)
        .bind(&req.sexo)
        .bind(&req.escuela_procedencia)
        .bind(&req.grado_grupo_asignado)
        .execute(&self.db_pool)
        .await?;

        let id = result.last_insert_rowid();
        log::info!("(create_student) Alumno creado id={} curp={}", id, req.curp);
        self.get_student(id).await
    }

    /// Solo cambia los campos enviados; el resultado se valida completo.
    pub async fn modify_student(
        &self,
        id: i64,
        patch: ModifyStudentRequest,
    ) -> AppResult<StudentRecord> {
        let current = self.get_student(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let merged = patch.apply_to(current);
        merged.validate()?;
        let merged = merged.normalized();

        sqlx::query(
            r#"
            UPDATE alumnos
            SET nombre = ?2,
                apellido_paterno = ?3,
                apellido_materno = ?4,
                correo_institucional = ?5,
                curp = ?6,
                sexo = ?7,
                escuela_procedencia = ?8,
                grado_grupo_asignado = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&merged.nombre)
        .bind(&merged.apellido_paterno)
        .bind(&merged.apellido_materno)
        .bind(&merged.correo_institucional)
        .bind(&merged.curp)
        .bind(&merged.sexo)
        .bind(&merged.escuela_procedencia)
        .bind(&merged.grado_grupo_asignado)
        .execute(&self.db_pool)
        .await?;

        log::info!("(modify_student) Alumno id={} actualizado", id);
        self.get_student(id).await
    }

    /// Borra al alumno junto con sus tutores, anexos e inscripciones.
    pub async fn delete_student(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM alumnos WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Alumno", id));
        }
        log::info!("(delete_student) Alumno id={} eliminado", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &StudentFilter) {
    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = like_pattern(q);
        qb.push(" AND (nombre LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR apellido_paterno LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR correo_institucional LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(curp) = &filter.curp {
        qb.push(" AND curp = ")
            .push_bind(crate::validation::normalize_code(curp));
    }
    if let Some(grupo) = &filter.grado_grupo {
        qb.push(" AND grado_grupo_asignado = ")
            .push_bind(crate::validation::normalize_code(grupo));
    }
    if let Some(sexo) = &filter.sexo {
        qb.push(" AND sexo = ")
            .push_bind(crate::validation::normalize_code(sexo));
    }
}
