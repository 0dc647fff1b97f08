//! models/auth_model.rs
//! Payloads de emisión, verificación y refresco de JWT.

use serde::{Deserialize, Serialize};

/// Claims del token. `orig_iat` se conserva al refrescar para acotar la
/// ventana total de refresco.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub user_id: i64,
    pub exp: i64,
    pub orig_iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenAuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub payload: Claims,
    /// Epoch (segundos) a partir del cual ya no se puede refrescar
    pub refresh_expires_in: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub payload: Claims,
}

/// Usuario autenticado que hace la petición.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub is_superuser: bool,
}

impl AuthUser {
    pub fn require_superuser(&self) -> Result<(), crate::error::AppError> {
        if self.is_superuser {
            Ok(())
        } else {
            Err(crate::error::AppError::forbidden(format!(
                "'{}' no es superusuario",
                self.username
            )))
        }
    }
}
