//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! El servicio de carros coordina los repositorios de carros y motores.

pub mod car_service;

pub use car_service::{CarOperations, CarService};
