//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod annex_model;
pub mod auth_model;
pub mod enrollment_model;
pub mod group_model;
pub mod page_model;
pub mod payment_model;
pub mod student_model;
pub mod tutor_model;
pub mod user_model;
