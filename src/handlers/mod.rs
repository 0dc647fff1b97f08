//! handlers/mod.rs
//! Módulo que agrupa los handlers HTTP (auth, alumnos, pagos, inscripciones, etc.).
pub mod annex_handler;
pub mod auth_guard;
pub mod auth_handler;
pub mod enrollment_handler;
pub mod group_handler;
pub mod payment_handler;
pub mod student_handler;
pub mod tutor_handler;
pub mod user_handler;
