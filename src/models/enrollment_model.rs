//! models/enrollment_model.rs
//! Inscripción: liga alumno, pago y el usuario que la emitió.

use serde::{Deserialize, Serialize};

use crate::models::{
    payment_model::PaymentRecord, student_model::StudentRecord, user_model::UserRecord,
};
use crate::validation::{self, ValidationErrors, Validator, MAX_TIPO_INSCRIPCION_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub factura: bool,
    pub tipo_inscripcion: String,
    pub modalidad_pago: String,
    pub alumno_id: i64,
    pub pago_id: i64,
    pub usuario_id: i64,
}

/// Inscripción con sus relaciones resueltas
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetail {
    pub id: i64,
    pub factura: bool,
    pub tipo_inscripcion: String,
    pub modalidad_pago: String,
    pub alumno: StudentRecord,
    pub pago: PaymentRecord,
    pub usuario: UserRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollmentRequest {
    #[serde(default)]
    pub factura: bool,
    pub tipo_inscripcion: String,
    pub modalidad_pago: String,
    pub alumno_id: i64,
    pub pago_id: i64,
    /// Si no se envía, la emite el usuario autenticado
    pub usuario_id: Option<i64>,
}

/// Inscripción lista para guardarse, con el emisor ya resuelto.
#[derive(Debug, Clone)]
pub struct EnrollmentData {
    pub factura: bool,
    pub tipo_inscripcion: String,
    pub modalidad_pago: String,
    pub alumno_id: i64,
    pub pago_id: i64,
    pub usuario_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyEnrollmentRequest {
    pub factura: Option<bool>,
    pub tipo_inscripcion: Option<String>,
    pub modalidad_pago: Option<String>,
    pub alumno_id: Option<i64>,
    pub pago_id: Option<i64>,
    pub usuario_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentFilter {
    pub alumno_id: Option<i64>,
    pub pago_id: Option<i64>,
    pub usuario_id: Option<i64>,
    pub factura: Option<bool>,
    pub tipo_inscripcion: Option<String>,
}

impl CreateEnrollmentRequest {
    pub fn with_issuer(self, issuer_id: i64) -> EnrollmentData {
        EnrollmentData {
            factura: self.factura,
            tipo_inscripcion: self.tipo_inscripcion,
            modalidad_pago: self.modalidad_pago,
            alumno_id: self.alumno_id,
            pago_id: self.pago_id,
            usuario_id: self.usuario_id.unwrap_or(issuer_id),
        }
    }
}

impl EnrollmentData {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check(
                "tipo_inscripcion",
                validation::required_text(&self.tipo_inscripcion, MAX_TIPO_INSCRIPCION_LEN),
            )
            .check("modalidad_pago", validation::modalidad_pago(&self.modalidad_pago))
            .check("alumno_id", validation::positive_id(self.alumno_id))
            .check("pago_id", validation::positive_id(self.pago_id))
            .check("usuario_id", validation::positive_id(self.usuario_id))
            .finish()
    }

    pub fn normalized(self) -> Self {
        EnrollmentData {
            tipo_inscripcion: validation::normalize_text(&self.tipo_inscripcion),
            modalidad_pago: validation::normalize_code(&self.modalidad_pago),
            ..self
        }
    }
}

impl ModifyEnrollmentRequest {
    pub fn is_empty(&self) -> bool {
        self.factura.is_none()
            && self.tipo_inscripcion.is_none()
            && self.modalidad_pago.is_none()
            && self.alumno_id.is_none()
            && self.pago_id.is_none()
            && self.usuario_id.is_none()
    }

    pub fn apply_to(self, current: EnrollmentRecord) -> EnrollmentData {
        EnrollmentData {
            factura: self.factura.unwrap_or(current.factura),
            tipo_inscripcion: self.tipo_inscripcion.unwrap_or(current.tipo_inscripcion),
            modalidad_pago: self.modalidad_pago.unwrap_or(current.modalidad_pago),
            alumno_id: self.alumno_id.unwrap_or(current.alumno_id),
            pago_id: self.pago_id.unwrap_or(current.pago_id),
            usuario_id: self.usuario_id.unwrap_or(current.usuario_id),
        }
    }
}
