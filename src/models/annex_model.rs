//! models/annex_model.rs
//! Anexo del alumno: documentos entregados, autorizaciones y datos de salud.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnnexRecord {
    pub id: i64,
    pub carta_buena_conducta: bool,
    pub certificado_primaria: bool,
    pub curp_alumno: bool,
    pub acta_nacimiento: bool,
    pub observaciones: String,
    /// URL opcional (puede ir vacía)
    pub cda: String,
    pub autorizacion_irse_solo: bool,
    pub autorizacion_publicitaria: bool,
    pub atencion_psicologica: bool,
    pub padecimiento: String,
    pub uso_aparato_auditivo: bool,
    pub uso_de_lentes: bool,
    pub lateralidad: String,
    pub alumno_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnexRequest {
    #[serde(default)]
    pub carta_buena_conducta: bool,
    #[serde(default)]
    pub certificado_primaria: bool,
    #[serde(default)]
    pub curp_alumno: bool,
    #[serde(default)]
    pub acta_nacimiento: bool,
    #[serde(default)]
    pub observaciones: String,
    #[serde(default)]
    pub cda: String,
    #[serde(default)]
    pub autorizacion_irse_solo: bool,
    #[serde(default)]
    pub autorizacion_publicitaria: bool,
    #[serde(default)]
    pub atencion_psicologica: bool,
    #[serde(default)]
    pub padecimiento: String,
    #[serde(default)]
    pub uso_aparato_auditivo: bool,
    #[serde(default)]
    pub uso_de_lentes: bool,
    pub lateralidad: String,
    pub alumno_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyAnnexRequest {
    pub carta_buena_conducta: Option<bool>,
    pub certificado_primaria: Option<bool>,
    pub curp_alumno: Option<bool>,
    pub acta_nacimiento: Option<bool>,
    pub observaciones: Option<String>,
    pub cda: Option<String>,
    pub autorizacion_irse_solo: Option<bool>,
    pub autorizacion_publicitaria: Option<bool>,
    pub atencion_psicologica: Option<bool>,
    pub padecimiento: Option<String>,
    pub uso_aparato_auditivo: Option<bool>,
    pub uso_de_lentes: Option<bool>,
    pub lateralidad: Option<String>,
    pub alumno_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnexFilter {
    pub alumno_id: Option<i64>,
    pub atencion_psicologica: Option<bool>,
    /// true: carta, certificado, CURP y acta entregados; false: falta alguno
    pub documentos_completos: Option<bool>,
}

impl AnnexRecord {
    pub fn documentos_completos(&self) -> bool {
        self.carta_buena_conducta
            && self.certificado_primaria
            && self.curp_alumno
            && self.acta_nacimiento
    }
}

impl CreateAnnexRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("cda", validation::optional_url(&self.cda))
            .check("lateralidad", validation::lateralidad(&self.lateralidad))
            .check("alumno_id", validation::positive_id(self.alumno_id))
            .finish()
    }

    pub fn normalized(self) -> Self {
        CreateAnnexRequest {
            observaciones: validation::normalize_text(&self.observaciones),
            cda: validation::normalize_text(&self.cda),
            padecimiento: validation::normalize_text(&self.padecimiento),
            lateralidad: validation::normalize_code(&self.lateralidad),
            ..self
        }
    }
}

impl ModifyAnnexRequest {
    pub fn is_empty(&self) -> bool {
        self.carta_buena_conducta.is_none()
            && self.certificado_primaria.is_none()
            && self.curp_alumno.is_none()
            && self.acta_nacimiento.is_none()
            && self.observaciones.is_none()
            && self.cda.is_none()
            && self.autorizacion_irse_solo.is_none()
            && self.autorizacion_publicitaria.is_none()
            && self.atencion_psicologica.is_none()
            && self.padecimiento.is_none()
            && self.uso_aparato_auditivo.is_none()
            && self.uso_de_lentes.is_none()
            && self.lateralidad.is_none()
            && self.alumno_id.is_none()
    }

    pub fn apply_to(self, current: AnnexRecord) -> CreateAnnexRequest {
        CreateAnnexRequest {
            carta_buena_conducta: self
                .carta_buena_conducta
                .unwrap_or(current.carta_buena_conducta),
            certificado_primaria: self
                .certificado_primaria
                .unwrap_or(current.certificado_primaria),
            curp_alumno: self.curp_alumno.unwrap_or(current.curp_alumno),
            acta_nacimiento: self.acta_nacimiento.unwrap_or(current.acta_nacimiento),
            observaciones: self.observaciones.unwrap_or(current.observaciones),
            cda: self.cda.unwrap_or(current.cda),
            autorizacion_irse_solo: self
                .autorizacion_irse_solo
                .unwrap_or(current.autorizacion_irse_solo),
            autorizacion_publicitaria: self
                .autorizacion_publicitaria
                .unwrap_or(current.autorizacion_publicitaria),
            atencion_psicologica: self
                .atencion_psicologica
                .unwrap_or(current.atencion_psicologica),
            padecimiento: self.padecimiento.unwrap_or(current.padecimiento),
            uso_aparato_auditivo: self
                .uso_aparato_auditivo
                .unwrap_or(current.uso_aparato_auditivo),
            uso_de_lentes: self.uso_de_lentes.unwrap_or(current.uso_de_lentes),
            lateralidad: self.lateralidad.unwrap_or(current.lateralidad),
            alumno_id: self.alumno_id.unwrap_or(current.alumno_id),
        }
    }
}
