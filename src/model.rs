//! Row types for the three tables and the write inputs accepted by the store.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPower {
    pub id: i64,
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

/// Allowed strength of a hero's power. Stored as its literal name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("strength must be 'Strong', 'Weak', or 'Average', got '{0}'")]
pub struct InvalidStrength(pub String);

impl FromStr for Strength {
    type Err = InvalidStrength;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| InvalidStrength(s.to_string()))
    }
}

#[derive(Clone, Debug)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

/// Input for inserting a power. The description must already have passed `validate_description`.
#[derive(Clone, Debug)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

/// Partial update for a power. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PowerChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PowerChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn apply(&self, power: &mut Power) {
        if let Some(name) = &self.name {
            power.name = name.clone();
        }
        if let Some(description) = &self.description {
            power.description = description.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_parses_exact_literals_only() {
        assert_eq!("Strong".parse::<Strength>().ok(), Some(Strength::Strong));
        assert_eq!("Weak".parse::<Strength>().ok(), Some(Strength::Weak));
        assert_eq!("Average".parse::<Strength>().ok(), Some(Strength::Average));
        assert!("strong".parse::<Strength>().is_err());
        assert!("Invincible".parse::<Strength>().is_err());
        assert!("".parse::<Strength>().is_err());
    }

    #[test]
    fn strength_serializes_as_plain_string() {
        let v = serde_json::to_value(Strength::Average).unwrap();
        assert_eq!(v, serde_json::json!("Average"));
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut power = Power {
            id: 1,
            name: "Flight".into(),
            description: "Allows the holder to fly through the air".into(),
        };
        PowerChanges {
            name: Some("Soaring".into()),
            description: None,
        }
        .apply(&mut power);
        assert_eq!(power.name, "Soaring");
        assert_eq!(power.description, "Allows the holder to fly through the air");
    }
}
