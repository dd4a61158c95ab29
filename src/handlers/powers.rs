//! Power listing, retrieval and partial update.

use super::{json_body, parse_id};
use crate::error::{AppError, Entity};
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::view::PowerSummary;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

pub async fn list_powers(State(state): State<AppState>) -> Result<Json<Vec<PowerSummary>>, AppError> {
    let powers = state.store.list_powers().await?;
    Ok(Json(powers.into_iter().map(PowerSummary::from).collect()))
}

pub async fn read_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<PowerSummary>, AppError> {
    let id = parse_id(&id_str, Entity::Power)?;
    let power = state.store.find_power(id).await?.ok_or(AppError::NotFound(Entity::Power))?;
    Ok(Json(power.into()))
}

/// PATCH /powers/:id. Unknown ids are reported before the body is validated.
pub async fn update_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PowerSummary>, AppError> {
    let id = parse_id(&id_str, Entity::Power)?;
    let current = state.store.find_power(id).await?.ok_or(AppError::NotFound(Entity::Power))?;
    let changes = RequestValidator::power_patch(json_body(body)?)?;
    if changes.is_empty() {
        return Ok(Json(current.into()));
    }
    let power = state
        .store
        .update_power(id, &changes)
        .await?
        .ok_or(AppError::NotFound(Entity::Power))?;
    tracing::info!(power_id = power.id, "power updated");
    Ok(Json(power.into()))
}
