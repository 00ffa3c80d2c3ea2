//! Utilidades de validación
//!
//! Reglas de negocio para carros y motores. La validación del carro se
//! detiene en el primer campo inválido; la del motor reporta todos los
//! campos implicados en la regla que falla.

use serde::Serialize;
use validator::ValidationError;

use crate::config::CarRules;
use crate::models::{Car, Engine, FuelType};
use crate::utils::errors::{invalid_parameter, AppResult};

pub const ENGINE_FIELDS: [&str; 3] = ["displacement", "noOfCylinder", "range"];

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que la marca esté en la lista permitida (sin distinguir mayúsculas)
pub fn check_brand(brand: &str, rules: &CarRules) -> AppResult<()> {
    let brand = brand.to_lowercase();
    if rules.brands.iter().any(|allowed| *allowed == brand) {
        Ok(())
    } else {
        Err(invalid_parameter(&["brand"]))
    }
}

/// Validar los campos del carro: model → yearOfManufacture → brand → fuelType
pub fn check_car(car: &Car, rules: &CarRules) -> AppResult<()> {
    validate_not_empty(&car.model).map_err(|_| invalid_parameter(&["model"]))?;

    validate_range(car.year_of_manufacture, rules.min_year, rules.max_year)
        .map_err(|_| invalid_parameter(&["yearOfManufacture"]))?;

    check_brand(&car.brand, rules)?;

    // El parseo del body ya rechazó combustibles desconocidos
    validate_enum(car.fuel_type, &FuelType::ALL).map_err(|_| invalid_parameter(&["fuelType"]))?;

    Ok(())
}

fn all<F: Fn(i32) -> bool>(values: &[i32], predicate: F) -> bool {
    values.iter().all(|v| predicate(*v))
}

/// Validar el motor: exactamente uno de los descriptores lleva el valor real
pub fn check_engine(engine: &Engine) -> AppResult<()> {
    let values = [engine.displacement, engine.n_cylinder, engine.range];

    if all(&values, |v| v > 0) || all(&values, |v| v == 0) || all(&values, |v| v < 0) {
        return Err(invalid_parameter(&ENGINE_FIELDS));
    }

    let negative: Vec<&str> = ENGINE_FIELDS
        .iter()
        .zip(values)
        .filter(|(_, value)| validate_non_negative(*value).is_err())
        .map(|(field, _)| *field)
        .collect();

    if !negative.is_empty() {
        return Err(invalid_parameter(&negative));
    }

    Ok(())
}
