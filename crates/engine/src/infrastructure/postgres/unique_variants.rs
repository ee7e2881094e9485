//! The variant pair attached to a unique creature.

use async_trait::async_trait;
use omega_domain::UniqueDinosaurId;

use super::client::PgClient;
use super::named::NamedParams;
use crate::infrastructure::ports::{RepoError, UniqueVariantLinks, UniqueVariantsCommandRepo};

const INSERT_PAIR: &str = r#"
    INSERT INTO unique_variants (unique_id, variant_id, slot)
    VALUES (:unique_id, :first_variant_id, 0), (:unique_id, :second_variant_id, 1)
"#;

const DELETE_FOR_UNIQUE: &str = "DELETE FROM unique_variants WHERE unique_id = :unique_id";

pub struct PgUniqueVariantsRepo {
    client: PgClient,
}

impl PgUniqueVariantsRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

fn pair_params(links: &UniqueVariantLinks) -> NamedParams {
    let [first, second] = links.variant_ids;
    NamedParams::new()
        .bind("unique_id", links.unique_id.value())
        .bind("first_variant_id", first.value())
        .bind("second_variant_id", second.value())
}

#[async_trait]
impl UniqueVariantsCommandRepo for PgUniqueVariantsRepo {
    async fn insert(&self, links: &UniqueVariantLinks) -> Result<(), RepoError> {
        let inserted = self.client.execute(INSERT_PAIR, pair_params(links)).await?;
        tracing::debug!(unique_id = %links.unique_id, rows = inserted, "Variant pair stored");
        Ok(())
    }

    async fn replace(&self, links: &UniqueVariantLinks) -> Result<(), RepoError> {
        self.delete(links.unique_id).await?;
        self.insert(links).await
    }

    async fn delete(&self, unique_id: UniqueDinosaurId) -> Result<(), RepoError> {
        self.client
            .delete(
                DELETE_FOR_UNIQUE,
                NamedParams::new().bind("unique_id", unique_id.value()),
            )
            .await
    }
}
