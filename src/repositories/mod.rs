//! Repositorios
//!
//! Acceso a las tablas cars y engines. Cada tabla expone un trait de store
//! para que el servicio pueda probarse sin base de datos.

pub mod car_repository;
pub mod engine_repository;

pub use car_repository::{CarRepository, CarStore};
pub use engine_repository::{EngineRepository, EngineStore};
