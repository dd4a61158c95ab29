//! Canonical seed data: ten heroes, four powers and one link per hero.

use crate::error::AppError;
use crate::model::{NewHero, NewHeroPower, NewPower, Strength};
use crate::service::validate_description;
use crate::store::HeroStore;

pub const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

pub const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

/// Clear every table, then insert the seed rows. Hero `i` gets power `i mod 4`
/// with strength `Strength::ALL[i mod 3]`.
pub async fn run(store: &dyn HeroStore) -> Result<SeedSummary, AppError> {
    tracing::info!("clearing tables");
    store.clear().await?;

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let description = validate_description(&serde_json::Value::from(*description))?;
        powers.push(
            store
                .create_power(&NewPower {
                    name: name.to_string(),
                    description,
                })
                .await?,
        );
    }

    let mut summary = SeedSummary {
        powers: powers.len(),
        ..SeedSummary::default()
    };
    for (i, (name, super_name)) in HEROES.iter().enumerate() {
        let hero = store
            .create_hero(&NewHero {
                name: name.to_string(),
                super_name: super_name.to_string(),
            })
            .await?;
        summary.heroes += 1;
        let power = &powers[i % powers.len()];
        store
            .create_hero_power(&NewHeroPower {
                strength: Strength::ALL[i % Strength::ALL.len()],
                hero_id: hero.id,
                power_id: power.id,
            })
            .await?;
        summary.hero_powers += 1;
    }

    tracing::info!(
        heroes = summary.heroes,
        powers = summary.powers,
        hero_powers = summary.hero_powers,
        "seed complete"
    );
    Ok(summary)
}
