//! Schema DDL for heroes, powers and hero_powers, plus database bootstrap.
//! Tables are created in FK dependency order; every statement is idempotent.

use crate::error::AppError;
use crate::model::Strength;
use crate::service::DESCRIPTION_MIN_LENGTH;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// FK constraint name, following `fk_<table>_<column>_<referred table>`.
pub fn fk_name(table: &str, column: &str, referred_table: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referred_table)
}

fn strength_check() -> String {
    let values: Vec<String> = Strength::ALL.iter().map(|s| format!("'{}'", s.as_str())).collect();
    format!("CHECK (strength IN ({}))", values.join(", "))
}

/// DDL statements in the order they must run.
pub fn schema_statements() -> Vec<String> {
    vec![
        r#"
        CREATE TABLE IF NOT EXISTS heroes (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            super_name TEXT NOT NULL
        )
        "#
        .to_string(),
        format!(
            r#"
        CREATE TABLE IF NOT EXISTS powers (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            CONSTRAINT ck_powers_description_length CHECK (char_length(description) >= {})
        )
        "#,
            DESCRIPTION_MIN_LENGTH
        ),
        format!(
            r#"
        CREATE TABLE IF NOT EXISTS hero_powers (
            id BIGSERIAL PRIMARY KEY,
            strength TEXT NOT NULL,
            hero_id BIGINT NOT NULL,
            power_id BIGINT NOT NULL,
            CONSTRAINT ck_hero_powers_strength {},
            CONSTRAINT {} FOREIGN KEY (hero_id) REFERENCES heroes (id) ON DELETE CASCADE,
            CONSTRAINT {} FOREIGN KEY (power_id) REFERENCES powers (id) ON DELETE CASCADE
        )
        "#,
            strength_check(),
            fk_name("hero_powers", "hero_id", "heroes"),
            fk_name("hero_powers", "power_id", "powers"),
        ),
        "CREATE INDEX IF NOT EXISTS ix_hero_powers_hero_id ON hero_powers (hero_id)".to_string(),
        "CREATE INDEX IF NOT EXISTS ix_hero_powers_power_id ON hero_powers (power_id)".to_string(),
    ]
}

/// Create the three tables and their indexes if they do not exist yet.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for sql in schema_statements() {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("schema up to date");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    ensure_database_exists_with(&opts).await
}

/// Same as [`ensure_database_exists`], from already parsed options.
pub async fn ensure_database_exists_with(opts: &PgConnectOptions) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(opts);
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let sql = "SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)";
    let exists: (bool,) = sqlx::query_as(sql)
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// target database name when the URL names one.
pub fn admin_options(opts: &PgConnectOptions) -> (PgConnectOptions, Option<String>) {
    let db_name = opts.get_database().map(str::to_string);
    (opts.clone().database("postgres"), db_name)
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
