//! error.rs
//! Errores de la capa de servicios y su traducción a respuestas HTTP.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "details": errors.fields(),
            }),
            AppError::Unauthorized(msg) => json!({ "error": "Unauthorized", "details": msg }),
            AppError::Forbidden(msg) => json!({ "error": "Forbidden", "details": msg }),
            AppError::NotFound { entity, id } => json!({
                "error": "Not found",
                "details": format!("{} {} no existe", entity, id),
            }),
            AppError::Conflict(msg) => json!({ "error": "Conflict", "details": msg }),
            AppError::Database(e) => {
                log::error!("Error de base de datos: {:?}", e);
                json!({ "error": "Internal server error", "details": "database error" })
            }
            AppError::Internal(e) => {
                log::error!("Error interno: {:?}", e);
                json!({ "error": "Internal server error", "details": format!("{}", e) })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Traduce violaciones de UNIQUE en `Conflict`; lo demás queda como error de DB.
pub fn map_unique_violation(err: sqlx::Error, msg: impl Into<String>) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(msg.into())
        }
        _ => AppError::Database(err),
    }
}
