//! HTTP handlers for heroes, powers and hero powers.

pub mod hero_powers;
pub mod heroes;
pub mod powers;

use crate::error::{AppError, Entity};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

/// Path ids are integers; anything else matches no row.
pub(crate) fn parse_id(id_str: &str, entity: Entity) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound(entity))
}

/// Unwrap a JSON body, reporting malformed input as a validation failure.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {}", e.body_text())))
}

pub use hero_powers::create_hero_power;
pub use heroes::{list_heroes, read_hero};
pub use powers::{list_powers, read_power, update_power};
