//! tests/mod.rs
//! Pruebas de servicios y de la API sobre SQLite en memoria.
mod api_tests;
mod auth_tests;
mod payment_tests;
mod user_group_tests;
