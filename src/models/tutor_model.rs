//! models/tutor_model.rs
//! Padre/madre o tutor ligado a un alumno.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TutorRecord {
    pub id: i64,
    pub nombre_padre_tutor: String,
    pub curp_tutor: String,
    /// URL del INE escaneado
    pub scan_ine: String,
    pub telefono: String,
    pub scan_comprobante_domicilio: String,
    pub email_padre_tutor: String,
    pub alumno_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTutorRequest {
    pub nombre_padre_tutor: String,
    pub curp_tutor: String,
    pub scan_ine: String,
    pub telefono: String,
    pub scan_comprobante_domicilio: String,
    pub email_padre_tutor: String,
    pub alumno_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyTutorRequest {
    pub nombre_padre_tutor: Option<String>,
    pub curp_tutor: Option<String>,
    pub scan_ine: Option<String>,
    pub telefono: Option<String>,
    pub scan_comprobante_domicilio: Option<String>,
    pub email_padre_tutor: Option<String>,
    pub alumno_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorFilter {
    pub alumno_id: Option<i64>,
    /// Subcadena del nombre
    pub q: Option<String>,
}

impl CreateTutorRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check(
                "nombre_padre_tutor",
                validation::required_text(&self.nombre_padre_tutor, MAX_NAME_LEN),
            )
            .check("curp_tutor", validation::curp(&self.curp_tutor))
            .check("scan_ine", validation::url(&self.scan_ine))
            .check("telefono", validation::phone(&self.telefono))
            .check(
                "scan_comprobante_domicilio",
                validation::url(&self.scan_comprobante_domicilio),
            )
            .check("email_padre_tutor", validation::email(&self.email_padre_tutor))
            .check("alumno_id", validation::positive_id(self.alumno_id))
            .finish()
    }

    pub fn normalized(self) -> Self {
        CreateTutorRequest {
            nombre_padre_tutor: validation::normalize_text(&self.nombre_padre_tutor),
            curp_tutor: validation::normalize_code(&self.curp_tutor),
            scan_ine: validation::normalize_text(&self.scan_ine),
            telefono: validation::normalize_text(&self.telefono),
            scan_comprobante_domicilio: validation::normalize_text(
                &self.scan_comprobante_domicilio,
            ),
            email_padre_tutor: validation::normalize_text(&self.email_padre_tutor),
            alumno_id: self.alumno_id,
        }
    }
}

impl ModifyTutorRequest {
    pub fn is_empty(&self) -> bool {
        self.nombre_padre_tutor.is_none()
            && self.curp_tutor.is_none()
            && self.scan_ine.is_none()
            && self.telefono.is_none()
            && self.scan_comprobante_domicilio.is_none()
            && self.email_padre_tutor.is_none()
            && self.alumno_id.is_none()
    }

    pub fn apply_to(self, current: TutorRecord) -> CreateTutorRequest {
        CreateTutorRequest {
            nombre_padre_tutor: self.nombre_padre_tutor.unwrap_or(current.nombre_padre_tutor),
            curp_tutor: self.curp_tutor.unwrap_or(current.curp_tutor),
            scan_ine: self.scan_ine.unwrap_or(current.scan_ine),
            telefono: self.telefono.unwrap_or(current.telefono),
            scan_comprobante_domicilio: self
                .scan_comprobante_domicilio
                .unwrap_or(current.scan_comprobante_domicilio),
            email_padre_tutor: self.email_padre_tutor.unwrap_or(current.email_padre_tutor),
            alumno_id: self.alumno_id.unwrap_or(current.alumno_id),
        }
    }
}
