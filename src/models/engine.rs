//! Modelo de Engine
//!
//! Mapea exactamente a la tabla engines. La primary key del motor es la
//! misma que la del carro al que pertenece.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Engine principal - mapea a la tabla engines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    #[serde(skip)]
    pub id: Uuid,
    pub displacement: i32,
    #[sqlx(rename = "no_of_cylinder")]
    #[serde(rename = "noOfCylinder", alias = "NCylinder")]
    pub n_cylinder: i32,
    pub range: i32,
}

impl Engine {
    /// Motor vacío que solo conoce su identificador
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
