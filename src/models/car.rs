//! Modelo de Car
//!
//! Este módulo contiene el agregado Car (carro + motor) y el filtro de
//! búsqueda usado por los listados.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::Engine;
use super::fuel::FuelType;

/// Car principal - un registro de la tabla cars junto con su motor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub model: String,
    pub year_of_manufacture: i32,
    pub brand: String,
    pub fuel_type: FuelType,
    pub engine: Engine,
}

impl Car {
    /// Asigna el mismo identificador al carro y a su motor
    pub fn assign_id(&mut self, id: Uuid) {
        self.id = id;
        self.engine.id = id;
    }
}

/// Filtros para listado de carros
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub brand: Option<String>,
    pub include_engine: bool,
}

impl CarFilter {
    /// Marca del filtro, ignorando valores vacíos
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref().filter(|b| !b.is_empty())
    }
}
