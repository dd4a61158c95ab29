//! PostgreSQL-backed store. Statements are fixed; values are always bound as parameters.

use super::{CreatedHeroPower, HeroPowerWithPower, HeroStore};
use crate::error::AppError;
use crate::model::{Hero, HeroPower, NewHero, NewHeroPower, NewPower, Power, PowerChanges, Strength};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

type HeroRow = (i64, String, String);
type PowerRow = (i64, String, String);
type HeroPowerRow = (i64, String, i64, i64);

fn hero_from_row((id, name, super_name): HeroRow) -> Hero {
    Hero { id, name, super_name }
}

fn power_from_row((id, name, description): PowerRow) -> Power {
    Power { id, name, description }
}

fn hero_power_from_row((id, strength, hero_id, power_id): HeroPowerRow) -> Result<HeroPower, AppError> {
    let strength: Strength = strength
        .parse()
        .map_err(|e: crate::model::InvalidStrength| AppError::Db(sqlx::Error::Decode(Box::new(e))))?;
    Ok(HeroPower {
        id,
        strength,
        hero_id,
        power_id,
    })
}

#[async_trait]
impl HeroStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        let sql = "SELECT id, name, super_name FROM heroes ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<HeroRow> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(hero_from_row).collect())
    }

    async fn find_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        let sql = "SELECT id, name, super_name FROM heroes WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<HeroRow> = sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(hero_from_row))
    }

    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerWithPower>, AppError> {
        let sql = r#"
            SELECT hp.id, hp.strength, hp.hero_id, hp.power_id, p.id, p.name, p.description
            FROM hero_powers hp
            JOIN powers p ON p.id = hp.power_id
            WHERE hp.hero_id = $1
            ORDER BY hp.id
        "#;
        tracing::debug!(sql = %sql, hero_id, "query");
        let rows: Vec<(i64, String, i64, i64, i64, String, String)> =
            sqlx::query_as(sql).bind(hero_id).fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(hp_id, strength, h_id, p_id, power_id, name, description)| {
                Ok(HeroPowerWithPower {
                    hero_power: hero_power_from_row((hp_id, strength, h_id, p_id))?,
                    power: power_from_row((power_id, name, description)),
                })
            })
            .collect()
    }

    async fn create_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let sql = "INSERT INTO heroes (name, super_name) VALUES ($1, $2) RETURNING id, name, super_name";
        tracing::debug!(sql = %sql, "query");
        let row: HeroRow = sqlx::query_as(sql)
            .bind(&hero.name)
            .bind(&hero.super_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(hero_from_row(row))
    }

    async fn delete_hero(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM heroes WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        let sql = "SELECT id, name, description FROM powers ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<PowerRow> = sqlx::query_as(sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(power_from_row).collect())
    }

    async fn find_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        let sql = "SELECT id, name, description FROM powers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<PowerRow> = sqlx::query_as(sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(power_from_row))
    }

    async fn create_power(&self, power: &NewPower) -> Result<Power, AppError> {
        let sql = "INSERT INTO powers (name, description) VALUES ($1, $2) RETURNING id, name, description";
        tracing::debug!(sql = %sql, "query");
        let row: PowerRow = sqlx::query_as(sql)
            .bind(&power.name)
            .bind(&power.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(power_from_row(row))
    }

    async fn update_power(&self, id: i64, changes: &PowerChanges) -> Result<Option<Power>, AppError> {
        // COALESCE keeps the stored value for absent fields.
        let sql = r#"
            UPDATE powers
            SET name = COALESCE($2, name), description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description
        "#;
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<PowerRow> = sqlx::query_as(sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(power_from_row))
    }

    async fn delete_power(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM powers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_hero_power(&self, hero_power: &NewHeroPower) -> Result<CreatedHeroPower, AppError> {
        let mut tx = self.pool.begin().await?;
        let sql = r#"
            INSERT INTO hero_powers (strength, hero_id, power_id)
            VALUES ($1, $2, $3)
            RETURNING id, strength, hero_id, power_id
        "#;
        tracing::debug!(sql = %sql, hero_id = hero_power.hero_id, power_id = hero_power.power_id, "query (tx)");
        // An error here drops `tx`, which rolls the transaction back.
        let row: HeroPowerRow = sqlx::query_as(sql)
            .bind(hero_power.strength.as_str())
            .bind(hero_power.hero_id)
            .bind(hero_power.power_id)
            .fetch_one(&mut *tx)
            .await?;
        let created = hero_power_from_row(row)?;

        let hero: HeroRow = sqlx::query_as("SELECT id, name, super_name FROM heroes WHERE id = $1")
            .bind(created.hero_id)
            .fetch_one(&mut *tx)
            .await?;
        let power: PowerRow = sqlx::query_as("SELECT id, name, description FROM powers WHERE id = $1")
            .bind(created.power_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(CreatedHeroPower {
            hero_power: created,
            hero: hero_from_row(hero),
            power: power_from_row(power),
        })
    }

    async fn clear(&self) -> Result<(), AppError> {
        let sql = "TRUNCATE hero_powers, heroes, powers RESTART IDENTITY";
        tracing::debug!(sql = %sql, "query");
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }
}
