//! Base creature writes.

use async_trait::async_trait;
use omega_domain::DinosaurId;

use super::client::PgClient;
use super::named::NamedParams;
use crate::infrastructure::ports::{CreateDinosaur, DinosaurCommandRepo, RepoError, UpdateDinosaur};

const INSERT: &str = r#"
    INSERT INTO dinosaurs (name, health, melee)
    VALUES (:name, :health, :melee)
    RETURNING id
"#;

const UPDATE: &str = r#"
    UPDATE dinosaurs
    SET name = :name, health = :health, melee = :melee, updated_at = NOW()
    WHERE id = :id
"#;

const DELETE: &str = "DELETE FROM dinosaurs WHERE id = :id";

pub struct PgDinosaurRepo {
    client: PgClient,
}

impl PgDinosaurRepo {
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DinosaurCommandRepo for PgDinosaurRepo {
    async fn insert(&self, dinosaur: &CreateDinosaur) -> Result<DinosaurId, RepoError> {
        let params = NamedParams::new()
            .bind("name", dinosaur.name.as_str())
            .bind("health", dinosaur.health.value())
            .bind("melee", dinosaur.melee.value());

        let id = self
            .client
            .store(INSERT, params)
            .await?
            .ok_or_else(|| RepoError::database("insert_dinosaur", "no id returned"))?;
        Ok(DinosaurId::from_i32(id))
    }

    async fn update(&self, dinosaur: &UpdateDinosaur) -> Result<(), RepoError> {
        let params = NamedParams::new()
            .bind("id", dinosaur.id.value())
            .bind("name", dinosaur.name.as_str())
            .bind("health", dinosaur.health.value())
            .bind("melee", dinosaur.melee.value());

        match self.client.execute(UPDATE, params).await? {
            0 => Err(RepoError::not_found("Dinosaur", dinosaur.id)),
            _ => Ok(()),
        }
    }

    async fn delete(&self, id: DinosaurId) -> Result<(), RepoError> {
        self.client
            .delete(DELETE, NamedParams::new().bind("id", id.value()))
            .await
    }
}
