//! Hero power creation.

use super::json_body;
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::view::HeroPowerView;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

/// POST /hero_powers. Strength is validated before the store is reached; unknown hero or
/// power ids are rejected by the store and nothing is persisted.
pub async fn create_hero_power(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<HeroPowerView>), AppError> {
    let new = RequestValidator::new_hero_power(json_body(body)?)?;
    let created = state.store.create_hero_power(&new).await?;
    tracing::info!(
        hero_power_id = created.hero_power.id,
        hero_id = created.hero.id,
        power_id = created.power.id,
        "hero power created"
    );
    Ok((StatusCode::CREATED, Json(created.into())))
}
