//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::CarOperations;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub cars: Arc<dyn CarOperations>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, cars: Arc<dyn CarOperations>) -> Self {
        Self { config, cars }
    }
}
