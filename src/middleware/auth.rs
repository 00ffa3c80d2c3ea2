//! Middleware de autenticación
//!
//! Este módulo verifica el header `Api-Key` de cada request contra la clave
//! configurada en `API_KEY`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::errors::AppError;

pub const API_KEY_HEADER: &str = "Api-Key";

/// Middleware de autenticación por API key
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("API key requerida".to_string()))?;

    if api_key != state.config.api_key {
        return Err(AppError::Unauthorized("API key inválida".to_string()));
    }

    Ok(next.run(request).await)
}
