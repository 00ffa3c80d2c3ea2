use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::car_repository::insert_error;
use crate::models::Engine;
use crate::utils::errors::{not_found_error, AppResult};

const ENTITY: &str = "engine";

/// Persistencia de la tabla engines
#[async_trait]
pub trait EngineStore: Send + Sync {
    async fn create(&self, engine: &Engine) -> AppResult<()>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Engine>;
    async fn update(&self, engine: &Engine) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EngineRepository {
    pool: PgPool,
}

impl EngineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngineStore for EngineRepository {
    async fn create(&self, engine: &Engine) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO engines (id, displacement, no_of_cylinder, "range")
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(engine.id)
        .bind(engine.displacement)
        .bind(engine.n_cylinder)
        .bind(engine.range)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(ENTITY, e))?;

        debug!("💾 Motor insertado: {}", engine.id);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Engine> {
        let engine = sqlx::query_as::<_, Engine>(
            r#"SELECT id, displacement, no_of_cylinder, "range" FROM engines WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        engine.ok_or_else(|| not_found_error(ENTITY, id))
    }

    async fn update(&self, engine: &Engine) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE engines
            SET displacement = $2, no_of_cylinder = $3, "range" = $4
            WHERE id = $1
            "#
        )
        .bind(engine.id)
        .bind(engine.displacement)
        .bind(engine.n_cylinder)
        .bind(engine.range)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error(ENTITY, engine.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM engines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error(ENTITY, id));
        }

        Ok(())
    }
}
