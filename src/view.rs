//! Response projections. Each endpoint has its own shape; nesting stops where a back-reference would recurse.

use crate::model::{Hero, Power, Strength};
use crate::store::{CreatedHeroPower, HeroPowerWithPower};
use serde::Serialize;

/// `{id, name, super_name}`: hero without its hero powers.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeroSummary {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

impl From<Hero> for HeroSummary {
    fn from(h: Hero) -> Self {
        HeroSummary {
            id: h.id,
            name: h.name,
            super_name: h.super_name,
        }
    }
}

/// `{id, name, description}`: power without its hero powers.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PowerSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Power> for PowerSummary {
    fn from(p: Power) -> Self {
        PowerSummary {
            id: p.id,
            name: p.name,
            description: p.description,
        }
    }
}

/// Hero power nested under a hero: carries the power but not the hero again.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NestedHeroPower {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub power: PowerSummary,
}

impl From<HeroPowerWithPower> for NestedHeroPower {
    fn from(hp: HeroPowerWithPower) -> Self {
        NestedHeroPower {
            id: hp.hero_power.id,
            hero_id: hp.hero_power.hero_id,
            power_id: hp.hero_power.power_id,
            strength: hp.hero_power.strength,
            power: hp.power.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeroDetail {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub hero_powers: Vec<NestedHeroPower>,
}

impl HeroDetail {
    pub fn new(hero: Hero, hero_powers: Vec<HeroPowerWithPower>) -> Self {
        HeroDetail {
            id: hero.id,
            name: hero.name,
            super_name: hero.super_name,
            hero_powers: hero_powers.into_iter().map(NestedHeroPower::from).collect(),
        }
    }
}

/// Response of hero power creation: both sides, each without their hero powers.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeroPowerView {
    pub id: i64,
    pub hero_id: i64,
    pub power_id: i64,
    pub strength: Strength,
    pub hero: HeroSummary,
    pub power: PowerSummary,
}

impl From<CreatedHeroPower> for HeroPowerView {
    fn from(c: CreatedHeroPower) -> Self {
        HeroPowerView {
            id: c.hero_power.id,
            hero_id: c.hero_power.hero_id,
            power_id: c.hero_power.power_id,
            strength: c.hero_power.strength,
            hero: c.hero.into(),
            power: c.power.into(),
        }
    }
}
