//! Variant group catalog.

use async_trait::async_trait;
use omega_domain::{VariantGroup, VariantGroupId, VariantGroupName};

use super::client::PgClient;
use super::named::NamedParams;
use crate::infrastructure::ports::{RepoError, VariantGroupRepo};

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: i32,
    name: String,
}

impl GroupRow {
    fn into_domain(self) -> Result<VariantGroup, RepoError> {
        Ok(VariantGroup::new(
            VariantGroupId::from_i32(self.id),
            VariantGroupName::new(self.name).map_err(RepoError::serialization)?,
        ))
    }
}

pub struct PgVariantGroupRepo {
    client: PgClient,
}

impl PgVariantGroupRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VariantGroupRepo for PgVariantGroupRepo {
    async fn get(&self, id: VariantGroupId) -> Result<VariantGroup, RepoError> {
        let row: GroupRow = self
            .client
            .get_one(
                "VariantGroup",
                "SELECT id, name FROM groups WHERE id = :id",
                NamedParams::new().bind("id", id.value()),
            )
            .await?;
        row.into_domain()
    }

    async fn list(&self) -> Result<Vec<VariantGroup>, RepoError> {
        let rows: Vec<GroupRow> = self
            .client
            .select_many("SELECT id, name FROM groups ORDER BY id", NamedParams::new())
            .await?;
        rows.into_iter().map(GroupRow::into_domain).collect()
    }

    async fn insert(&self, name: &VariantGroupName) -> Result<VariantGroupId, RepoError> {
        let id = self
            .client
            .store(
                "INSERT INTO groups (name) VALUES (:name) RETURNING id",
                NamedParams::new().bind("name", name.as_str()),
            )
            .await?
            .ok_or_else(|| RepoError::database("insert_group", "no id returned"))?;
        Ok(VariantGroupId::from_i32(id))
    }

    async fn update(&self, group: &VariantGroup) -> Result<(), RepoError> {
        let params = NamedParams::new()
            .bind("id", group.id().value())
            .bind("name", group.name().as_str());
        let updated = self
            .client
            .execute(
                "UPDATE groups SET name = :name, updated_at = NOW() WHERE id = :id",
                params,
            )
            .await?;
        if updated == 0 {
            return Err(RepoError::not_found("VariantGroup", group.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: VariantGroupId) -> Result<(), RepoError> {
        self.client
            .delete(
                "DELETE FROM groups WHERE id = :id",
                NamedParams::new().bind("id", id.value()),
            )
            .await
    }
}
