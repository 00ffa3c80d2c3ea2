//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! de reglas de negocio.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult};
