//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean
//! al schema PostgreSQL (tablas cars y engines).

pub mod car;
pub mod engine;
pub mod fuel;

pub use car::{Car, CarFilter};
pub use engine::Engine;
pub use fuel::FuelType;
