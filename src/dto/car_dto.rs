use serde::Deserialize;
use uuid::Uuid;

use crate::models::{Car, CarFilter, Engine, FuelType};
use crate::utils::errors::{AppError, AppResult};

// Request para crear o actualizar un carro
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year_of_manufacture: i32,
    #[serde(default)]
    pub brand: String,
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub engine: Engine,
}

impl CarRequest {
    /// Convertir el request en un Car con el identificador dado
    pub fn into_car(self, id: Uuid) -> AppResult<Car> {
        let fuel_type: FuelType = self
            .fuel_type
            .ok_or_else(|| AppError::MissingParameter("fuelType".to_string()))?
            .parse()?;

        let mut car = Car {
            id,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            brand: self.brand,
            fuel_type,
            engine: self.engine,
        };
        car.assign_id(id);

        Ok(car)
    }
}

// Query string de GET /car
#[derive(Debug, Default, Deserialize)]
pub struct CarQuery {
    pub brand: Option<String>,
    pub engine: Option<String>,
}

impl From<CarQuery> for CarFilter {
    fn from(query: CarQuery) -> Self {
        CarFilter {
            brand: query.brand,
            include_engine: query.engine.as_deref() == Some("true"),
        }
    }
}
