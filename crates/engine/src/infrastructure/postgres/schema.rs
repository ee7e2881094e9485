//! Postgres schema bootstrap.

use sqlx::PgPool;

use super::client::map_sqlx_error;
use crate::infrastructure::ports::RepoError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS groups (
        id          SERIAL PRIMARY KEY,
        name        TEXT NOT NULL UNIQUE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS variants (
        id          SERIAL PRIMARY KEY,
        group_id    INTEGER NOT NULL REFERENCES groups (id),
        name        TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (group_id, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS dinosaurs (
        id          SERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        health      BIGINT NOT NULL CHECK (health > 0),
        melee       BIGINT NOT NULL CHECK (melee >= 0),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS uniques (
        id                 SERIAL PRIMARY KEY,
        dinosaur_id        INTEGER NOT NULL REFERENCES dinosaurs (id),
        name               TEXT NOT NULL,
        health_multiplier  REAL NOT NULL CHECK (health_multiplier > 0),
        damage_multiplier  REAL NOT NULL CHECK (damage_multiplier > 0),
        created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS unique_variants (
        id          SERIAL PRIMARY KEY,
        unique_id   INTEGER NOT NULL REFERENCES uniques (id) ON DELETE CASCADE,
        variant_id  INTEGER NOT NULL REFERENCES variants (id),
        slot        SMALLINT NOT NULL CHECK (slot IN (0, 1)),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (unique_id, slot)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS uniques_dinosaur_id ON uniques (dinosaur_id)",
    "CREATE INDEX IF NOT EXISTS unique_variants_variant_id ON unique_variants (variant_id)",
];

/// Create the catalog tables and indexes when they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepoError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }

    tracing::info!("Postgres schema initialized (tables and indexes ensured)");
    Ok(())
}
