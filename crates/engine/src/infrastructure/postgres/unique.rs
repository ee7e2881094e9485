//! Unique creature rows and the joined aggregate read.

use async_trait::async_trait;
use omega_domain::{
    Dinosaur, DinosaurId, DinosaurName, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueDinosaur, UniqueDinosaurId, UniqueName, UniqueVariants, Variant, VariantGroupName,
    VariantId, VariantName,
};
use serde::Deserialize;
use sqlx::types::Json;

use super::client::PgClient;
use super::named::NamedParams;
use crate::infrastructure::ports::{
    CreateUniqueDinosaur, RepoError, UniqueCommandRepo, UniqueQueryRepo, UpdateUniqueDinosaur,
};

// =============================================================================
// Commands
// =============================================================================

const INSERT: &str = r#"
    INSERT INTO uniques (dinosaur_id, name, health_multiplier, damage_multiplier)
    VALUES (:dinosaur_id, :name, :health_multiplier, :damage_multiplier)
    RETURNING id
"#;

const UPDATE: &str = r#"
    UPDATE uniques
    SET dinosaur_id = :dinosaur_id,
        name = :name,
        health_multiplier = :health_multiplier,
        damage_multiplier = :damage_multiplier,
        updated_at = NOW()
    WHERE id = :id
"#;

const DELETE: &str = "DELETE FROM uniques WHERE id = :id";

pub struct PgUniqueRepo {
    client: PgClient,
}

impl PgUniqueRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UniqueCommandRepo for PgUniqueRepo {
    async fn insert(&self, unique: &CreateUniqueDinosaur) -> Result<UniqueDinosaurId, RepoError> {
        let params = NamedParams::new()
            .bind("dinosaur_id", unique.dinosaur_id.value())
            .bind("name", unique.name.as_str())
            .bind("health_multiplier", unique.health_multiplier.value())
            .bind("damage_multiplier", unique.damage_multiplier.value());

        let id = self
            .client
            .store(INSERT, params)
            .await?
            .ok_or_else(|| RepoError::database("insert_unique", "no id returned"))?;
        Ok(UniqueDinosaurId::from_i32(id))
    }

    async fn update(&self, unique: &UpdateUniqueDinosaur) -> Result<(), RepoError> {
        let params = NamedParams::new()
            .bind("id", unique.id.value())
            .bind("dinosaur_id", unique.dinosaur_id.value())
            .bind("name", unique.name.as_str())
            .bind("health_multiplier", unique.health_multiplier.value())
            .bind("damage_multiplier", unique.damage_multiplier.value());

        match self.client.execute(UPDATE, params).await? {
            0 => Err(RepoError::not_found("UniqueDinosaur", unique.id)),
            _ => Ok(()),
        }
    }

    async fn delete(&self, id: UniqueDinosaurId) -> Result<(), RepoError> {
        self.client
            .delete(DELETE, NamedParams::new().bind("id", id.value()))
            .await
    }
}

// =============================================================================
// Aggregate read
// =============================================================================

/// One query returns the unique row, its base creature and the ordered variant pair
/// (aggregated as JSON so the pair arrives on a single row).
const SELECT_AGGREGATE: &str = r#"
    SELECT
        u.id                AS unique_id,
        u.name              AS unique_name,
        u.health_multiplier AS health_multiplier,
        u.damage_multiplier AS damage_multiplier,
        d.id                AS base_id,
        d.name              AS base_name,
        d.health            AS base_health,
        d.melee             AS base_melee,
        JSONB_AGG(
            JSONB_BUILD_OBJECT(
                'variant_id', v.id,
                'variant_name', v.name,
                'group_name', g.name
            )
            ORDER BY uv.slot
        ) AS variants
    FROM uniques u
    JOIN dinosaurs d ON d.id = u.dinosaur_id
    JOIN unique_variants uv ON uv.unique_id = u.id
    JOIN variants v ON v.id = uv.variant_id
    JOIN groups g ON g.id = v.group_id
"#;

const GROUP_BY: &str = "GROUP BY u.id, d.id";

#[derive(Debug, sqlx::FromRow)]
struct UniqueAggregateRow {
    unique_id: i32,
    unique_name: String,
    health_multiplier: f32,
    damage_multiplier: f32,
    base_id: i32,
    base_name: String,
    base_health: i64,
    base_melee: i64,
    variants: Json<Vec<VariantJson>>,
}

#[derive(Debug, Deserialize)]
struct VariantJson {
    variant_id: i32,
    variant_name: String,
    group_name: String,
}

impl UniqueAggregateRow {
    fn into_domain(self) -> Result<UniqueDinosaur, RepoError> {
        let health = u32::try_from(self.base_health).map_err(RepoError::serialization)?;
        let melee = u32::try_from(self.base_melee).map_err(RepoError::serialization)?;

        let base = Dinosaur::new(
            DinosaurId::from_i32(self.base_id),
            DinosaurName::new(self.base_name).map_err(RepoError::serialization)?,
            Health::new(health).map_err(RepoError::serialization)?,
            Melee::new(melee),
        );

        let variants = self
            .variants
            .0
            .into_iter()
            .map(|v| {
                Ok(Variant::new(
                    VariantId::from_i32(v.variant_id),
                    VariantGroupName::new(v.group_name).map_err(RepoError::serialization)?,
                    VariantName::new(v.variant_name).map_err(RepoError::serialization)?,
                ))
            })
            .collect::<Result<Vec<_>, RepoError>>()?;

        Ok(UniqueDinosaur::new(
            base,
            UniqueDinosaurId::from_i32(self.unique_id),
            UniqueName::new(self.unique_name).map_err(RepoError::serialization)?,
            HealthMultiplier::new(self.health_multiplier).map_err(RepoError::serialization)?,
            MeleeMultiplier::new(self.damage_multiplier).map_err(RepoError::serialization)?,
            UniqueVariants::try_from_vec(variants).map_err(RepoError::serialization)?,
        ))
    }
}

pub struct PgUniqueQueryRepo {
    client: PgClient,
}

impl PgUniqueQueryRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UniqueQueryRepo for PgUniqueQueryRepo {
    async fn get(&self, id: UniqueDinosaurId) -> Result<UniqueDinosaur, RepoError> {
        let query = format!("{SELECT_AGGREGATE} WHERE u.id = :id {GROUP_BY}");
        let row: UniqueAggregateRow = self
            .client
            .get_one("UniqueDinosaur", &query, NamedParams::new().bind("id", id.value()))
            .await?;
        row.into_domain()
    }

    async fn list(&self) -> Result<Vec<UniqueDinosaur>, RepoError> {
        let query = format!("{SELECT_AGGREGATE} {GROUP_BY} ORDER BY u.id");
        let rows: Vec<UniqueAggregateRow> =
            self.client.select_many(&query, NamedParams::new()).await?;
        rows.into_iter().map(UniqueAggregateRow::into_domain).collect()
    }
}
