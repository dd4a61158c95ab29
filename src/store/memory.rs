//! In-process store. Holds all rows behind one lock so every operation is atomic.

use super::{CreatedHeroPower, HeroPowerWithPower, HeroStore};
use crate::error::AppError;
use crate::model::{Hero, HeroPower, NewHero, NewHeroPower, NewPower, Power, PowerChanges};
use crate::service::DESCRIPTION_MIN_LENGTH;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    heroes: BTreeMap<i64, Hero>,
    powers: BTreeMap<i64, Power>,
    hero_powers: BTreeMap<i64, HeroPower>,
    next_hero_id: i64,
    next_power_id: i64,
    next_hero_power_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn check_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() < DESCRIPTION_MIN_LENGTH {
        return Err(AppError::Constraint("ck_powers_description_length".into()));
    }
    Ok(())
}

fn poisoned() -> AppError {
    AppError::Db(sqlx::Error::Protocol("memory store lock poisoned".into()))
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables.write().map_err(|_| poisoned())
    }

    /// Number of stored hero powers.
    pub fn hero_power_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.hero_powers.len())
    }
}

#[async_trait]
impl HeroStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        Ok(self.read()?.heroes.values().cloned().collect())
    }

    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        Ok(self.read()?.heroes.get(&id).cloned())
    }

    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerWithPower>, AppError> {
        let t = self.read()?;
        Ok(t.hero_powers
            .values()
            .filter(|hp| hp.hero_id == hero_id)
            .filter_map(|hp| {
                t.powers.get(&hp.power_id).map(|p| HeroPowerWithPower {
                    hero_power: hp.clone(),
                    power: p.clone(),
                })
            })
            .collect())
    }

    async fn create_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let mut t = self.write()?;
        let id = next_id(&mut t.next_hero_id);
        let row = Hero {
            id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
        };
        t.heroes.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_hero(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write()?;
        if t.heroes.remove(&id).is_none() {
            return Ok(false);
        }
        t.hero_powers.retain(|_, hp| hp.hero_id != id);
        Ok(true)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        Ok(self.read()?.powers.values().cloned().collect())
    }

    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        Ok(self.read()?.powers.get(&id).cloned())
    }

    async fn create_power(&self, power: &NewPower) -> Result<Power, AppError> {
        check_description(&power.description)?;
        let mut t = self.write()?;
        let id = next_id(&mut t.next_power_id);
        let row = Power {
            id,
            name: power.name.clone(),
            description: power.description.clone(),
        };
        t.powers.insert(id, row.clone());
        Ok(row)
    }

    async fn update_power(&self, id: i64, changes: &PowerChanges) -> Result<Option<Power>, AppError> {
        if let Some(description) = &changes.description {
            check_description(description)?;
        }
        let mut t = self.write()?;
        Ok(t.powers.get_mut(&id).map(|power| {
            changes.apply(power);
            power.clone()
        }))
    }

    async fn delete_power(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write()?;
        if t.powers.remove(&id).is_none() {
            return Ok(false);
        }
        t.hero_powers.retain(|_, hp| hp.power_id != id);
        Ok(true)
    }

    async fn create_hero_power(&self, hero_power: &NewHeroPower) -> Result<CreatedHeroPower, AppError> {
        let mut t = self.write()?;
        let hero = t
            .heroes
            .get(&hero_power.hero_id)
            .cloned()
            .ok_or_else(|| AppError::Constraint("fk_hero_powers_hero_id_heroes".into()))?;
        let power = t
            .powers
            .get(&hero_power.power_id)
            .cloned()
            .ok_or_else(|| AppError::Constraint("fk_hero_powers_power_id_powers".into()))?;
        let id = next_id(&mut t.next_hero_power_id);
        let row = HeroPower {
            id,
            strength: hero_power.strength,
            hero_id: hero.id,
            power_id: power.id,
        };
        t.hero_powers.insert(id, row.clone());
        Ok(CreatedHeroPower {
            hero_power: row,
            hero,
            power,
        })
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.write()? = Tables::default();
        Ok(())
    }
}
