//! Request validation for write paths. Pure functions: nothing here touches the store.

use crate::error::AppError;
use crate::model::{NewHeroPower, PowerChanges, Strength};
use serde_json::{Map, Value};

/// Minimum length, in characters, of a power description.
pub const DESCRIPTION_MIN_LENGTH: usize = 20;

/// A description must be a string of at least [`DESCRIPTION_MIN_LENGTH`] characters.
pub fn validate_description(v: &Value) -> Result<String, AppError> {
    let s = v
        .as_str()
        .ok_or_else(|| AppError::Validation("description must be a string".into()))?;
    if s.chars().count() < DESCRIPTION_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "description must be at least {} characters",
            DESCRIPTION_MIN_LENGTH
        )));
    }
    Ok(s.to_string())
}

/// Names back NOT NULL text columns, so null and non-strings are rejected.
pub fn validate_name(field: &str, v: &Value) -> Result<String, AppError> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", field)))
}

pub fn validate_strength(v: &Value) -> Result<Strength, AppError> {
    let s = v
        .as_str()
        .ok_or_else(|| AppError::Validation("strength must be a string".into()))?;
    s.parse().map_err(|e: crate::model::InvalidStrength| AppError::Validation(e.to_string()))
}

fn validate_id(field: &str, v: Option<&Value>) -> Result<i64, AppError> {
    v.and_then(Value::as_i64)
        .ok_or_else(|| AppError::Validation(format!("{} must be an integer", field)))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::Validation("body must be a JSON object".into())),
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a PATCH body for a power. Only `name` and `description` are read; other keys are ignored.
    /// Any invalid field fails the whole request.
    pub fn power_patch(body: Value) -> Result<PowerChanges, AppError> {
        let body = body_to_map(body)?;
        let description = body.get("description").map(validate_description).transpose()?;
        let name = body.get("name").map(|v| validate_name("name", v)).transpose()?;
        Ok(PowerChanges { name, description })
    }

    /// Validate a POST body for a hero power. Strength is checked before the ids.
    pub fn new_hero_power(body: Value) -> Result<NewHeroPower, AppError> {
        let body = body_to_map(body)?;
        let strength = body
            .get("strength")
            .ok_or_else(|| AppError::Validation("strength is required".into()))
            .and_then(validate_strength)?;
        let hero_id = validate_id("hero_id", body.get("hero_id"))?;
        let power_id = validate_id("power_id", body.get("power_id"))?;
        Ok(NewHeroPower {
            strength,
            hero_id,
            power_id,
        })
    }
}
