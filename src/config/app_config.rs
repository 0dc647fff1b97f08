//! config/app_config.rs
//! Configuración global leída de variables de entorno (.env incluido), con
//! valores por defecto para desarrollo.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEV_JWT_SECRET: &str = "easyenroll-dev-secret-no-usar-en-produccion";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Vigencia de cada token (segundos)
    pub expiration_secs: i64,
    /// Ventana desde `orig_iat` durante la cual se puede refrescar (segundos)
    pub refresh_expiration_secs: i64,
}

/// Superusuario que se crea al arrancar si todavía no existe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            secret: DEV_JWT_SECRET.to_string(),
            expiration_secs: 300,
            refresh_expiration_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            workers: 2,
            database_url: "sqlite:data/easyenroll.db".to_string(),
            jwt: JwtConfig::default(),
            bootstrap_admin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables (permite probar sin tocar el entorno del proceso).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let host = lookup("EASYENROLL_HOST").unwrap_or(defaults.host);
        let port = match lookup("EASYENROLL_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("EASYENROLL_PORT inválido: '{}'", v))?,
            None => defaults.port,
        };
        let workers = match lookup("EASYENROLL_WORKERS") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("EASYENROLL_WORKERS inválido: '{}'", v))?
                .max(1),
            None => defaults.workers,
        };
        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);

        let secret = match lookup("JWT_SECRET") {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                log::warn!("JWT_SECRET no definido; usando secreto de desarrollo");
                defaults.jwt.secret
            }
        };
        let expiration_secs = match lookup("JWT_EXPIRATION_SECS") {
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("JWT_EXPIRATION_SECS inválido: '{}'", v))?,
            None => defaults.jwt.expiration_secs,
        };
        let refresh_expiration_secs = match lookup("JWT_REFRESH_EXPIRATION_SECS") {
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("JWT_REFRESH_EXPIRATION_SECS inválido: '{}'", v))?,
            None => defaults.jwt.refresh_expiration_secs,
        };
        anyhow::ensure!(
            expiration_secs > 0 && refresh_expiration_secs > 0,
            "las vigencias de JWT deben ser positivas"
        );

        let bootstrap_admin = match (
            lookup("EASYENROLL_ADMIN_USERNAME"),
            lookup("EASYENROLL_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin {
                email: lookup("EASYENROLL_ADMIN_EMAIL")
                    .unwrap_or_else(|| format!("{}@localhost.mx", username)),
                username,
                password,
            }),
            _ => None,
        };

        Ok(AppConfig {
            host,
            port,
            workers,
            database_url,
            jwt: JwtConfig {
                secret,
                expiration_secs,
                refresh_expiration_secs,
            },
            bootstrap_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.port, 5022);
        assert_eq!(cfg.jwt.expiration_secs, 300);
        assert_eq!(cfg.jwt.refresh_expiration_secs, 604_800);
        assert!(cfg.bootstrap_admin.is_none());
    }

    #[test]
    fn reads_overrides_and_admin() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("EASYENROLL_PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "otro-secreto"),
            ("EASYENROLL_ADMIN_USERNAME", "direccion"),
            ("EASYENROLL_ADMIN_PASSWORD", "cambiar-esto"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.jwt.secret, "otro-secreto");
        let admin = cfg.bootstrap_admin.unwrap();
        assert_eq!(admin.username, "direccion");
        assert_eq!(admin.email, "direccion@localhost.mx");
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(AppConfig::from_lookup(lookup_from(&[("EASYENROLL_PORT", "abc")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("JWT_EXPIRATION_SECS", "0")])).is_err());
    }
}
