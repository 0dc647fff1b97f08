//! models/page_model.rs
//! Paginación compartida por todos los listados.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationQuery {
    #[cfg(test)]
    pub fn new(page: u64, page_size: u64) -> Self {
        PaginationQuery {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Página (1-based) normalizada: nunca menor a 1.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }

    /// Satura en `i64::MAX`; una página fuera de rango devuelve una lista vacía.
    pub fn offset(&self) -> i64 {
        let offset = (self.page() - 1).saturating_mul(self.page_size());
        i64::try_from(offset).unwrap_or(i64::MAX)
    }
}

/// Para listar registros con paginación
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: i64, pagination: &PaginationQuery, items: Vec<T>) -> Self {
        Page {
            total: total.max(0) as u64,
            page: pagination.page(),
            page_size: pagination.page_size(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(entity: &str, id: i64) -> Self {
        DeleteResponse {
            success: true,
            id,
            message: format!("{} {} eliminado", entity, id),
        }
    }
}
