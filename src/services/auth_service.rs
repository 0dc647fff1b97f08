//! services/auth_service.rs
//! Emisión, verificación y refresco de JWT (HS256) y hash de contraseñas.

use std::sync::LazyLock;

use anyhow::anyhow;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::app_config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::auth_model::{AuthUser, Claims, TokenResponse, VerifyResponse};
use crate::models::user_model::UserRecord;
use crate::services::user_service::UserService;

/// Hash contra el que se verifican los usuarios inexistentes.
pub(crate) static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    hash_password("easyenroll-usuario-inexistente").ok()
});

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow!("No se pudo generar hash de contraseña: {}", e)))
}

/// `hash_password` fuera del hilo del executor.
pub async fn hash_password_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Tarea de hash abortada: {}", e)))?
}

/// Un hash corrupto cuenta como contraseña incorrecta.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("(verify_password) Hash almacenado inválido: {}", e);
            false
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_service: UserService,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
    refresh_expiration_secs: i64,
}

impl AuthService {
    pub fn new(user_service: UserService, config: &JwtConfig) -> Self {
        AuthService {
            user_service,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_secs: config.expiration_secs,
            refresh_expiration_secs: config.refresh_expiration_secs,
        }
    }

    /// Verifica usuario/contraseña y emite un token nuevo.
    pub async fn token_auth(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let invalid = || AppError::unauthorized("credenciales inválidas");

        // Un usuario inexistente también paga una verificación Argon2.
        let credentials = self.user_service.find_credentials(username).await?;
        let hash = match &credentials {
            Some((_, hash)) => hash.clone(),
            None => (*DUMMY_HASH).clone().unwrap_or_default(),
        };

        let candidate = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow!("Tarea de verificación abortada: {}", e)))?;

        let Some((user, _)) = credentials else {
            log::warn!("(token_auth) Usuario desconocido '{}'", username);
            return Err(invalid());
        };
        if !matches {
            log::warn!("(token_auth) Contraseña incorrecta para '{}'", username);
            return Err(invalid());
        }
        if !user.is_active {
            log::warn!("(token_auth) Usuario inactivo '{}'", username);
            return Err(invalid());
        }

        self.user_service.touch_last_login(user.id).await?;

        let now = Utc::now().timestamp();
        let response = self.issue(&user.username, user.id, now, now)?;
        log::info!("(token_auth) Token emitido para '{}'", username);
        Ok(response)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<VerifyResponse> {
        let payload = self.decode_claims(token)?;
        Ok(VerifyResponse { payload })
    }

    /// Emite un token nuevo conservando `orig_iat`, siempre que el token sea
    /// válido, el usuario siga activo y no haya pasado la ventana de refresco.
    pub async fn refresh_token(&self, token: &str) -> AppResult<TokenResponse> {
        self.refresh_token_at(token, Utc::now().timestamp()).await
    }

    pub async fn refresh_token_at(&self, token: &str, now: i64) -> AppResult<TokenResponse> {
        let claims = self.decode_claims(token)?;
        if now > claims.orig_iat + self.refresh_expiration_secs {
            return Err(AppError::unauthorized("el token ya no se puede refrescar"));
        }
        let user = self.active_user(&claims).await?;
        log::info!("(refresh_token) Refrescando token de '{}'", user.username);
        self.issue(&user.username, user.id, now, claims.orig_iat)
    }

    /// Resuelve el usuario de un token; falla si ya no existe o está inactivo.
    pub async fn authenticate(&self, token: &str) -> AppResult<AuthUser> {
        let claims = self.decode_claims(token)?;
        let user = self.active_user(&claims).await?;
        Ok(AuthUser {
            id: user.id,
            username: user.username,
            is_superuser: user.is_superuser,
        })
    }

    async fn active_user(&self, claims: &Claims) -> AppResult<UserRecord> {
        let user = match self.user_service.get_user(claims.user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound { .. }) => {
                return Err(AppError::unauthorized("el usuario del token no existe"))
            }
            Err(e) => return Err(e),
        };
        if !user.is_active || user.username != claims.username {
            return Err(AppError::unauthorized("usuario inactivo o token inválido"));
        }
        Ok(user)
    }

    fn issue(&self, username: &str, user_id: i64, now: i64, orig_iat: i64) -> AppResult<TokenResponse> {
        let claims = Claims {
            username: username.to_string(),
            user_id,
            exp: now + self.expiration_secs,
            orig_iat,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow!("No se pudo firmar el token: {}", e)))?;

        Ok(TokenResponse {
            token,
            refresh_expires_in: orig_iat + self.refresh_expiration_secs,
            payload: claims,
        })
    }

    fn decode_claims(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("token inválido: {}", e)))
    }
}
