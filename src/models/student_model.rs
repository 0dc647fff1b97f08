//! models/student_model.rs
//! Alumno: registro, payloads de alta/modificación y filtros.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator, MAX_NAME_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentRecord {
    pub id: i64,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub correo_institucional: String,
    pub curp: String,
    pub sexo: String,
    pub escuela_procedencia: String,
    pub grado_grupo_asignado: String,
}

/// Request para dar de alta un alumno
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub correo_institucional: String,
    pub curp: String,
    pub sexo: String,
    pub escuela_procedencia: String,
    pub grado_grupo_asignado: String,
}

/// Solo los campos presentes se modifican.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyStudentRequest {
    pub nombre: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
    pub correo_institucional: Option<String>,
    pub curp: Option<String>,
    pub sexo: Option<String>,
    pub escuela_procedencia: Option<String>,
    pub grado_grupo_asignado: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    /// Búsqueda libre en nombre, apellido paterno y correo institucional
    pub q: Option<String>,
    pub curp: Option<String>,
    pub grado_grupo: Option<String>,
    pub sexo: Option<String>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("nombre", validation::required_text(&self.nombre, MAX_NAME_LEN))
            .check(
                "apellido_paterno",
                validation::required_text(&self.apellido_paterno, MAX_NAME_LEN),
            )
            .check(
                "apellido_materno",
                validation::required_text(&self.apellido_materno, MAX_NAME_LEN),
            )
            .check(
                "correo_institucional",
                validation::email(&self.correo_institucional),
            )
            .check("curp", validation::curp(&self.curp))
            .check("sexo", validation::sexo(&self.sexo))
            .check(
                "escuela_procedencia",
                validation::required_text(&self.escuela_procedencia, MAX_NAME_LEN),
            )
            .check(
                "grado_grupo_asignado",
                validation::grado_grupo(&self.grado_grupo_asignado),
            )
            .finish()
    }

    /// Recorta espacios y pasa los códigos a mayúsculas.
    pub fn normalized(self) -> Self {
        CreateStudentRequest {
            nombre: validation::normalize_text(&self.nombre),
            apellido_paterno: validation::normalize_text(&self.apellido_paterno),
            apellido_materno: validation::normalize_text(&self.apellido_materno),
            correo_institucional: validation::normalize_text(&self.correo_institucional),
            curp: validation::normalize_code(&self.curp),
            sexo: validation::normalize_code(&self.sexo),
            escuela_procedencia: validation::normalize_text(&self.escuela_procedencia),
            grado_grupo_asignado: validation::normalize_code(&self.grado_grupo_asignado),
        }
    }
}

impl ModifyStudentRequest {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.apellido_paterno.is_none()
            && self.apellido_materno.is_none()
            && self.correo_institucional.is_none()
            && self.curp.is_none()
            && self.sexo.is_none()
            && self.escuela_procedencia.is_none()
            && self.grado_grupo_asignado.is_none()
    }

    /// Aplica los cambios sobre el registro actual.
    pub fn apply_to(self, current: StudentRecord) -> CreateStudentRequest {
        CreateStudentRequest {
            nombre: self.nombre.unwrap_or(current.nombre),
            apellido_paterno: self.apellido_paterno.unwrap_or(current.apellido_paterno),
            apellido_materno: self.apellido_materno.unwrap_or(current.apellido_materno),
            correo_institucional: self
                .correo_institucional
                .unwrap_or(current.correo_institucional),
            curp: self.curp.unwrap_or(current.curp),
            sexo: self.sexo.unwrap_or(current.sexo),
            escuela_procedencia: self
                .escuela_procedencia
                .unwrap_or(current.escuela_procedencia),
            grado_grupo_asignado: self
                .grado_grupo_asignado
                .unwrap_or(current.grado_grupo_asignado),
        }
    }
}
