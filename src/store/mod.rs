//! Repository access to heroes, powers and hero powers.
//!
//! [`HeroStore`] is the only way handlers reach persisted state. [`PgStore`] is backed by
//! PostgreSQL; [`MemoryStore`] keeps everything in process and enforces the same constraints
//! the schema does (foreign keys, cascade delete, strength set, description length).

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Hero, HeroPower, NewHero, NewHeroPower, NewPower, Power, PowerChanges};
use async_trait::async_trait;

/// A hero power together with the power it links to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPowerWithPower {
    pub hero_power: HeroPower,
    pub power: Power,
}

/// A freshly inserted hero power with both sides of the association.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedHeroPower {
    pub hero_power: HeroPower,
    pub hero: Hero,
    pub power: Power,
}

#[async_trait]
pub trait HeroStore: Send + Sync {
    /// Cheap liveness check of the backing datastore.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError>;
    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError>;
    /// Hero powers of one hero, ordered by id, each joined with its power.
    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerWithPower>, AppError>;
    async fn create_hero(&self, hero: &NewHero) -> Result<Hero, AppError>;
    /// Delete a hero and every hero power referencing it. Returns false when the id is unknown.
    async fn delete_hero(&self, id: i64) -> Result<bool, AppError>;

    async fn list_powers(&self) -> Result<Vec<Power>, AppError>;
    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError>;
    async fn create_power(&self, power: &NewPower) -> Result<Power, AppError>;
    /// Apply the present fields only. Returns None when the id is unknown.
    async fn update_power(&self, id: i64, changes: &PowerChanges) -> Result<Option<Power>, AppError>;
    /// Delete a power and every hero power referencing it. Returns false when the id is unknown.
    async fn delete_power(&self, id: i64) -> Result<bool, AppError>;

    /// Insert a hero power. Unknown hero or power ids yield [`AppError::Constraint`] and nothing is persisted.
    async fn create_hero_power(&self, hero_power: &NewHeroPower) -> Result<CreatedHeroPower, AppError>;

    /// Remove every row from every table.
    async fn clear(&self) -> Result<(), AppError>;
}
