//! config/mod.rs
//! Configuración de la aplicación (servidor, base de datos, JWT).

pub mod app_config;
