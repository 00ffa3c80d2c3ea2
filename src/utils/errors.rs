//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("parameter(s) {} invalid", .0.join(", "))]
    InvalidParameter(Vec<String>),

    #[error("parameter {0} is missing")]
    MissingParameter(String),

    #[error("entity {entity} with id {id} not found")]
    EntityNotFound { entity: String, id: String },

    #[error("entity {0} already exists")]
    EntityAlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Código HTTP asociado a cada tipo de error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) | AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            // Compatibilidad con los clientes existentes: un duplicado no es un fallo
            AppError::EntityAlreadyExists(_) => StatusCode::OK,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = match self {
            AppError::InvalidParameter(fields) => {
                warn!("⚠️ Parámetros inválidos: {:?}", fields);
                ErrorResponse {
                    error: "Invalid Parameter".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!({ "fields": fields })),
                    code: Some("INVALID_PARAMETER".to_string()),
                }
            }

            AppError::MissingParameter(field) => {
                warn!("⚠️ Parámetro requerido ausente: {}", field);
                ErrorResponse {
                    error: "Missing Parameter".to_string(),
                    message: format!("parameter {} is missing", field),
                    details: Some(json!({ "fields": [field] })),
                    code: Some("MISSING_PARAMETER".to_string()),
                }
            }

            AppError::EntityNotFound { entity, id } => {
                warn!("🔍 {} no encontrado: {}", entity, id);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: format!("{} with id '{}' not found", entity, id),
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                }
            }

            AppError::EntityAlreadyExists(entity) => {
                warn!("⚠️ {} ya existe", entity);
                ErrorResponse {
                    error: "Already Exists".to_string(),
                    message: format!("{} already exists", entity),
                    details: None,
                    code: Some("ALREADY_EXISTS".to_string()),
                }
            }

            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: None,
                    code: Some("DB_ERROR".to_string()),
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Acceso no autorizado: {}", msg);
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code: Some("UNAUTHORIZED".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de parámetros inválidos
pub fn invalid_parameter(fields: &[&str]) -> AppError {
    AppError::InvalidParameter(fields.iter().map(|f| f.to_string()).collect())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(entity: &str, id: impl ToString) -> AppError {
    AppError::EntityNotFound {
        entity: entity.to_string(),
        id: id.to_string(),
    }
}
