use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Car, CarFilter, Engine, FuelType};
use crate::utils::errors::{not_found_error, AppError, AppResult};

const ENTITY: &str = "car";

/// Persistencia de la tabla cars
#[async_trait]
pub trait CarStore: Send + Sync {
    async fn create(&self, car: &Car) -> AppResult<()>;
    async fn get_all(&self, filter: &CarFilter) -> AppResult<Vec<Car>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Car>;
    async fn update(&self, car: &Car) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

// Fila de la tabla cars; el motor solo se conoce por engine_id
#[derive(Debug, sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    model: String,
    year_of_manufacture: i32,
    brand: String,
    fuel_type: FuelType,
    engine_id: Uuid,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: row.id,
            model: row.model,
            year_of_manufacture: row.year_of_manufacture,
            brand: row.brand,
            fuel_type: row.fuel_type,
            engine: Engine::with_id(row.engine_id),
        }
    }
}

/// Convierte errores de INSERT: una clave duplicada es un conflicto, no un fallo de BD
pub(crate) fn insert_error(entity: &str, e: sqlx::Error) -> AppError {
    let duplicate = e
        .as_database_error()
        .map_or(false, |db_error| db_error.is_unique_violation());

    if duplicate {
        AppError::EntityAlreadyExists(entity.to_string())
    } else {
        AppError::Database(e)
    }
}

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for CarRepository {
    async fn create(&self, car: &Car) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cars (id, model, year_of_manufacture, brand, fuel_type, engine_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        )
        .bind(car.id)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(&car.brand)
        .bind(car.fuel_type)
        .bind(car.engine.id)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(ENTITY, e))?;

        debug!("💾 Carro insertado: {}", car.id);
        Ok(())
    }

    async fn get_all(&self, filter: &CarFilter) -> AppResult<Vec<Car>> {
        let rows = match filter.brand() {
            Some(brand) => {
                sqlx::query_as::<_, CarRow>(
                    r#"
                    SELECT id, model, year_of_manufacture, brand, fuel_type, engine_id
                    FROM cars
                    WHERE LOWER(brand) = LOWER($1)
                    ORDER BY model
                    "#
                )
                .bind(brand)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CarRow>(
                    "SELECT id, model, year_of_manufacture, brand, fuel_type, engine_id FROM cars ORDER BY model"
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Car> {
        let row = sqlx::query_as::<_, CarRow>(
            "SELECT id, model, year_of_manufacture, brand, fuel_type, engine_id FROM cars WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Car::from).ok_or_else(|| not_found_error(ENTITY, id))
    }

    async fn update(&self, car: &Car) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE cars
            SET model = $2, year_of_manufacture = $3, brand = $4, fuel_type = $5, engine_id = $6
            WHERE id = $1
            "#
        )
        .bind(car.id)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(&car.brand)
        .bind(car.fuel_type)
        .bind(car.engine.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error(ENTITY, car.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error(ENTITY, id));
        }

        Ok(())
    }
}
