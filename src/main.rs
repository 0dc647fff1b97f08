use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::database::setup_database;
use crate::logger::init_logger;
use crate::services::Services;

mod app;
mod config;
mod database;
mod error;
mod handlers;
mod logger;
mod models;
mod services;
mod validation;

#[cfg(test)]
mod tests;

fn to_io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Configuración inválida: {:#}", e);
        to_io_error(e)
    })?;

    // Conectarnos a la DB (crea el archivo y corre migraciones)
    let db_pool = setup_database(&config.database_url).await.map_err(|e| {
        log::error!("No se pudo preparar la base de datos: {:#}", e);
        to_io_error(e)
    })?;

    let services = Services::new(db_pool, &config.jwt);

    if let Some(admin) = &config.bootstrap_admin {
        match services.users.ensure_superuser(admin).await {
            Ok(true) => log::info!("Superusuario '{}' creado", admin.username),
            Ok(false) => {}
            Err(e) => {
                log::error!("No se pudo crear el superusuario: {}", e);
                return Err(to_io_error(e));
            }
        }
    }

    // Levantar servidor
    log::info!(
        "Levantando servidor en {}:{} ({} workers)",
        config.host,
        config.port,
        config.workers
    );
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| services.register(cfg))
            .configure(app::init_app)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
