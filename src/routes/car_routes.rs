use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::car_dto::{CarQuery, CarRequest};
use crate::middleware::auth::api_key_middleware;
use crate::models::{Car, CarFilter};
use crate::state::AppState;
use crate::utils::errors::{invalid_parameter, AppError};

pub fn create_car_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/car", post(create_car).get(list_cars))
        .route("/car/:id", get(get_car).put(update_car).delete(delete_car))
        .route_layer(middleware::from_fn_with_state(state, api_key_middleware))
}

fn car_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    path.map(|Path(id)| id).map_err(|_| invalid_parameter(&["id"]))
}

fn car_body(body: Result<Json<CarRequest>, JsonRejection>) -> Result<CarRequest, AppError> {
    body.map(|Json(request)| request).map_err(|e| {
        tracing::debug!("❌ Body inválido: {}", e);
        invalid_parameter(&["body"])
    })
}

async fn create_car(
    State(state): State<AppState>,
    body: Result<Json<CarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    // El id lo asigna el servicio
    let car = car_body(body)?.into_car(Uuid::nil())?;
    let created = state.cars.create(car).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_cars(
    State(state): State<AppState>,
    query: Result<Query<CarQuery>, QueryRejection>,
) -> Result<Json<Vec<Car>>, AppError> {
    let Query(query) = query.map_err(|_| invalid_parameter(&["query"]))?;
    let cars = state.cars.get_all(CarFilter::from(query)).await?;
    Ok(Json(cars))
}

async fn get_car(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Car>, AppError> {
    let id = car_id(path)?;
    let car = state.cars.get_by_id(id).await?;
    Ok(Json(car))
}

async fn update_car(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CarRequest>, JsonRejection>,
) -> Result<Json<Car>, AppError> {
    let id = car_id(path)?;
    let car = car_body(body)?.into_car(id)?;
    let updated = state.cars.update(car).await?;
    Ok(Json(updated))
}

async fn delete_car(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = car_id(path)?;
    state.cars.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
