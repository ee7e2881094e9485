//! Variant catalog. Reads join the owning group so callers get its name.

use async_trait::async_trait;
use omega_domain::{Variant, VariantGroupId, VariantGroupName, VariantId, VariantName};

use super::client::PgClient;
use super::named::NamedParams;
use crate::infrastructure::ports::{RepoError, VariantRepo};

const SELECT: &str = r#"
    SELECT v.id AS id, v.name AS name, g.name AS group_name
    FROM variants v
    JOIN groups g ON g.id = v.group_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: i32,
    name: String,
    group_name: String,
}

impl VariantRow {
    fn into_domain(self) -> Result<Variant, RepoError> {
        Ok(Variant::new(
            VariantId::from_i32(self.id),
            VariantGroupName::new(self.group_name).map_err(RepoError::serialization)?,
            VariantName::new(self.name).map_err(RepoError::serialization)?,
        ))
    }
}

pub struct PgVariantRepo {
    client: PgClient,
}

impl PgVariantRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VariantRepo for PgVariantRepo {
    async fn get(&self, id: VariantId) -> Result<Variant, RepoError> {
        let query = format!("{SELECT} WHERE v.id = :id");
        let row: VariantRow = self
            .client
            .get_one("Variant", &query, NamedParams::new().bind("id", id.value()))
            .await?;
        row.into_domain()
    }

    async fn list(&self) -> Result<Vec<Variant>, RepoError> {
        let query = format!("{SELECT} ORDER BY v.id");
        let rows: Vec<VariantRow> = self.client.select_many(&query, NamedParams::new()).await?;
        rows.into_iter().map(VariantRow::into_domain).collect()
    }

    async fn insert(
        &self,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<VariantId, RepoError> {
        let id = self
            .client
            .store(
                "INSERT INTO variants (group_id, name) VALUES (:group_id, :name) RETURNING id",
                NamedParams::new()
                    .bind("group_id", group_id.value())
                    .bind("name", name.as_str()),
            )
            .await?
            .ok_or_else(|| RepoError::database("insert_variant", "no id returned"))?;
        Ok(VariantId::from_i32(id))
    }

    async fn update(
        &self,
        id: VariantId,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<(), RepoError> {
        let params = NamedParams::new()
            .bind("id", id.value())
            .bind("group_id", group_id.value())
            .bind("name", name.as_str());
        let updated = self
            .client
            .execute(
                "UPDATE variants SET group_id = :group_id, name = :name, updated_at = NOW() WHERE id = :id",
                params,
            )
            .await?;
        if updated == 0 {
            return Err(RepoError::not_found("Variant", id));
        }
        Ok(())
    }

    async fn delete(&self, id: VariantId) -> Result<(), RepoError> {
        self.client
            .delete(
                "DELETE FROM variants WHERE id = :id",
                NamedParams::new().bind("id", id.value()),
            )
            .await
    }
}
