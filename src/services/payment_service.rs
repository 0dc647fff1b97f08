//! services/payment_service.rs

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::page_model::{Page, PaginationQuery};
use crate::models::payment_model::{
    CreatePaymentRequest, ModifyPaymentRequest, PaymentFilter, PaymentRecord,
};

const PAYMENT_COLUMNS: &str = "id, recibo, descuento, id_recibo, monto, fecha_pago, metodo_pago";

#[derive(Clone, Debug)]
pub struct PaymentService {
    db_pool: Pool<Sqlite>,
}

impl PaymentService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        PaymentService { db_pool }
    }

    /// Pagos más recientes primero
    pub async fn list_payments(
        &self,
        filter: &PaymentFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<PaymentRecord>> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM pagos WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM pagos WHERE 1 = 1",
            PAYMENT_COLUMNS
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY fecha_pago DESC, id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<PaymentRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_payment(&self, id: i64) -> AppResult<PaymentRecord> {
        let sql = format!("SELECT {} FROM pagos WHERE id = ?1", PAYMENT_COLUMNS);
        sqlx::query_as::<_, PaymentRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Pago", id))
    }

    pub async fn create_payment(&self, req: CreatePaymentRequest) -> AppResult<PaymentRecord> {
        req.validate()?;
        let req = req.normalized();

        let result = sqlx::query(
            r#"
            INSERT INTO pagos (recibo, descuento, id_recibo, monto, fecha_pago, metodo_pago)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&req.recibo)
        .bind(req.descuento)
        .bind(req.id_recibo)
        .bind(req.monto)
        .bind(req.fecha_pago)
        .bind(&req.metodo_pago)
        .execute(&self.db_pool)
        .await?;

        let id = result.last_insert_rowid();
        log::info!(
            "(create_payment) Pago creado id={} recibo={} monto={:.2} metodo={}",
            id,
            req.id_recibo,
            req.monto,
            req.metodo_pago
        );
        self.get_payment(id).await
    }

    pub async fn modify_payment(
        &self,
        id: i64,
        patch: ModifyPaymentRequest,
    ) -> AppResult<PaymentRecord> {
        let current = self.get_payment(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let merged = patch.apply_to(current);
        merged.validate()?;
        let merged = merged.normalized();

        sqlx::query(
            r#"
            UPDATE pagos
            SET recibo = ?2,
                descuento = ?3,
                id_recibo = ?4,
                monto = ?5,
                fecha_pago = ?6,
                metodo_pago = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&merged.recibo)
        .bind(merged.descuento)
        .bind(merged.id_recibo)
        .bind(merged.monto)
        .bind(merged.fecha_pago)
        .bind(&merged.metodo_pago)
        .execute(&self.db_pool)
        .await?;

        log::info!("(modify_payment) Pago id={} actualizado", id);
        self.get_payment(id).await
    }

    /// Las inscripciones que usan el pago se borran en cascada.
    pub async fn delete_payment(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pagos WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Pago", id));
        }
        log::info!("(delete_payment) Pago id={} eliminado", id);
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PaymentFilter) {
    if let Some(metodo) = &filter.metodo_pago {
        qb.push(" AND metodo_pago = ").push_bind(metodo.trim().to_string());
    }
    if let Some(desde) = filter.fecha_desde {
        qb.push(" AND fecha_pago >= ").push_bind(desde);
    }
    if let Some(hasta) = filter.fecha_hasta {
        qb.push(" AND fecha_pago <= ").push_bind(hasta);
    }
    if let Some(id_recibo) = filter.id_recibo {
        qb.push(" AND id_recibo = ").push_bind(id_recibo);
    }
}
