//! Tipo de combustible
//!
//! Mapea al ENUM `fuel_type` de PostgreSQL y al campo `fuelType` del JSON.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::Type;
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::{invalid_parameter, AppError};

/// Tipo de combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Type, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Diesel,
    Petrol,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Diesel, FuelType::Petrol, FuelType::Electric];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::Petrol => "petrol",
            FuelType::Electric => "electric",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diesel" => Ok(FuelType::Diesel),
            "petrol" => Ok(FuelType::Petrol),
            "electric" => Ok(FuelType::Electric),
            _ => Err(invalid_parameter(&["fuelType"])),
        }
    }
}

// Acepta cualquier combinación de mayúsculas ("Petrol", "PETROL", ...)
impl<'de> Deserialize<'de> for FuelType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
