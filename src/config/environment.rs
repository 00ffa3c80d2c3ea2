//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del servidor y de las reglas de
//! negocio de los carros (marcas permitidas, rango de años).

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Marcas aceptadas por defecto
pub const DEFAULT_BRANDS: [&str; 5] = ["tesla", "porsche", "bmw", "mercedes", "ferrari"];
pub const DEFAULT_MIN_YEAR: i32 = 1866;
pub const DEFAULT_MAX_YEAR: i32 = 2022;

/// Reglas de negocio para validar carros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRules {
    pub min_year: i32,
    pub max_year: i32,
    /// Siempre en minúsculas
    pub brands: Vec<String>,
}

impl Default for CarRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_YEAR,
            DEFAULT_MAX_YEAR,
            DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
        )
    }
}

impl CarRules {
    pub fn new(min_year: i32, max_year: i32, brands: Vec<String>) -> Self {
        Self {
            min_year,
            max_year,
            brands: brands
                .into_iter()
                .map(|b| b.trim().to_lowercase())
                .filter(|b| !b.is_empty())
                .collect(),
        }
    }

    /// Cargar reglas desde CAR_MIN_YEAR, CAR_MAX_YEAR y CAR_BRANDS
    pub fn from_env() -> Result<Self> {
        let min_year = env_or("CAR_MIN_YEAR", DEFAULT_MIN_YEAR)?;
        let max_year = env_or("CAR_MAX_YEAR", DEFAULT_MAX_YEAR)?;
        if min_year > max_year {
            anyhow::bail!("CAR_MIN_YEAR ({}) is greater than CAR_MAX_YEAR ({})", min_year, max_year);
        }

        let brands = match env::var("CAR_BRANDS") {
            Ok(list) => parse_brands(&list)?,
            Err(_) => DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
        };

        Ok(Self::new(min_year, max_year, brands))
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub api_key: String,
    pub cors_origins: Vec<String>,
    pub car_rules: CarRules,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env_or("PORT", 8000)?,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_key: env::var("API_KEY").context("API_KEY must be set")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_default(),
            car_rules: CarRules::from_env()?,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_brands(value: &str) -> Result<Vec<String>> {
    let brands = parse_list(value);
    if brands.is_empty() {
        anyhow::bail!("CAR_BRANDS is set but contains no brands");
    }
    Ok(brands)
}
