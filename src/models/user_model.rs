//! models/user_model.rs
//! Usuario genérico del sistema (quien emite inscripciones y obtiene tokens).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors, Validator};

/// Nunca incluye el hash de la contraseña.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserRecord,
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_superuser: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    /// Subcadena de username o email
    pub q: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .check("username", validation::username(&self.username))
            .check("password", validation::password(&self.password))
            .check("email", validation::email(&self.email))
            .finish()
    }
}

impl ModifyUserRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        if let Some(email) = &self.email {
            v.check("email", validation::email(email));
        }
        if let Some(password) = &self.password {
            v.check("password", validation::password(password));
        }
        v.finish()
    }

    /// Cambios que un usuario puede hacer sobre su propia cuenta.
    pub fn is_self_service(&self) -> bool {
        self.is_superuser.is_none() && self.is_staff.is_none() && self.is_active.is_none()
    }
}
