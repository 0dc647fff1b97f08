//! models/payment_model.rs
//! Pago: recibo, descuento, monto, fecha y método.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: i64,
    /// URL del recibo escaneado
    pub recibo: String,
    /// Porcentaje (0-100)
    pub descuento: i64,
    pub id_recibo: i64,
    pub monto: f64,
    pub fecha_pago: NaiveDate,
    /// Código SAT de forma de pago ("01", "03", ...)
    pub metodo_pago: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub recibo: String,
    #[serde(default)]
    pub descuento: i64,
    pub id_recibo: i64,
    pub monto: f64,
    pub fecha_pago: NaiveDate,
    pub metodo_pago: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyPaymentRequest {
    pub recibo: Option<String>,
    pub descuento: Option<i64>,
    pub id_recibo: Option<i64>,
    pub monto: Option<f64>,
    pub fecha_pago: Option<NaiveDate>,
    pub metodo_pago: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentFilter {
    pub metodo_pago: Option<String>,
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
    pub id_recibo: Option<i64>,
}

impl CreatePaymentRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("recibo", validation::url(&self.recibo))
            .check("descuento", validation::discount(self.descuento))
            .check("id_recibo", validation::positive_id(self.id_recibo))
            .check("monto", validation::amount(self.monto))
            .check("fecha_pago", validation::payment_date(self.fecha_pago))
            .check("metodo_pago", validation::payment_method(&self.metodo_pago))
            .finish()
    }

    pub fn normalized(self) -> Self {
        CreatePaymentRequest {
            recibo: validation::normalize_text(&self.recibo),
            monto: validation::round_cents(self.monto),
            metodo_pago: validation::normalize_text(&self.metodo_pago),
            ..self
        }
    }
}

impl ModifyPaymentRequest {
    pub fn is_empty(&self) -> bool {
        self.recibo.is_none()
            && self.descuento.is_none()
            && self.id_recibo.is_none()
            && self.monto.is_none()
            && self.fecha_pago.is_none()
            && self.metodo_pago.is_none()
    }

    pub fn apply_to(self, current: PaymentRecord) -> CreatePaymentRequest {
        CreatePaymentRequest {
            recibo: self.recibo.unwrap_or(current.recibo),
            descuento: self.descuento.unwrap_or(current.descuento),
            id_recibo: self.id_recibo.unwrap_or(current.id_recibo),
            monto: self.monto.unwrap_or(current.monto),
            fecha_pago: self.fecha_pago.unwrap_or(current.fecha_pago),
            metodo_pago: self.metodo_pago.unwrap_or(current.metodo_pago),
        }
    }
}
