//! Hero listing and retrieval.

use super::parse_id;
use crate::error::{AppError, Entity};
use crate::state::AppState;
use crate::view::{HeroDetail, HeroSummary};
use axum::extract::{Path, State};
use axum::Json;

/// GET /heroes: id, name and super_name of every hero.
pub async fn list_heroes(State(state): State<AppState>) -> Result<Json<Vec<HeroSummary>>, AppError> {
    let heroes = state.store.list_heroes().await?;
    Ok(Json(heroes.into_iter().map(HeroSummary::from).collect()))
}

/// GET /heroes/:id: the hero with its hero powers and each linked power.
pub async fn read_hero(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<HeroDetail>, AppError> {
    let id = parse_id(&id_str, Entity::Hero)?;
    let hero = state.store.find_hero(id).await?.ok_or(AppError::NotFound(Entity::Hero))?;
    let hero_powers = state.store.hero_powers_of(id).await?;
    Ok(Json(HeroDetail::new(hero, hero_powers)))
}
