//! Unique creature use cases.
//!
//! A unique creature spans three tables (base dinosaur, unique row, variant pair).
//! Every write touches them inside one unit of work so a failure never leaves a
//! partial creature behind. Reads go straight to the query repository.

mod error;
mod types;


use omega_domain::{UniqueDinosaur, UniqueDinosaurId};

use crate::infrastructure::ports::UniqueRepositories;
use crate::infrastructure::unit_of_work::{
    run_in_transaction, run_in_transaction_unit, UnitOfWork,
};

pub use error::UniqueError;
pub use types::{CreateCreature, UpdateCreature};

/// Orchestrates reads and transactional writes of unique creatures.
pub struct UniqueUseCases {
    repositories: UniqueRepositories,
    unit_of_work: Option<UnitOfWork<UniqueRepositories>>,
}

impl UniqueUseCases {
    /// `unit_of_work` is optional: without it writes run directly against
    /// `repositories`, one statement at a time, with no atomicity.
    pub fn new(
        repositories: UniqueRepositories,
        unit_of_work: Option<UnitOfWork<UniqueRepositories>>,
    ) -> Self {
        Self {
            repositories,
            unit_of_work,
        }
    }

    pub async fn find(&self, id: UniqueDinosaurId) -> Result<UniqueDinosaur, UniqueError> {
        self.repositories
            .query
            .get(id)
            .await
            .map_err(|e| UniqueError::from_read(id, e))
    }

    /// All unique creatures; empty when there are none.
    pub async fn list(&self) -> Result<Vec<UniqueDinosaur>, UniqueError> {
        self.repositories
            .query
            .list()
            .await
            .map_err(UniqueError::from_repo)
    }

    /// Insert the base creature, the unique row and the variant pair, then return the
    /// aggregate as read back from storage.
    pub async fn create(&self, input: CreateCreature) -> Result<UniqueDinosaur, UniqueError> {
        let created = run_in_transaction(
            self.unit_of_work.as_ref(),
            &self.repositories,
            move |repos: UniqueRepositories| async move {
                let dinosaur_id = repos
                    .dinosaurs
                    .insert(&input.dinosaur())
                    .await
                    .map_err(UniqueError::from_repo)?;
                let unique_id = repos
                    .uniques
                    .insert(&input.unique(dinosaur_id))
                    .await
                    .map_err(UniqueError::from_repo)?;
                repos
                    .unique_variants
                    .insert(&input.variants(unique_id))
                    .await
                    .map_err(UniqueError::from_repo)?;

                let created = repos
                    .query
                    .get(unique_id)
                    .await
                    .map_err(|e| UniqueError::from_read(unique_id, e))?;
                Ok::<_, UniqueError>(created)
            },
        )
        .await?;

        tracing::info!(
            unique_id = %created.id(),
            dinosaur_id = %created.base().id(),
            name = %created.name(),
            "Unique dinosaur created"
        );
        Ok(created)
    }

    /// Replace every field of an existing unique creature and its base creature.
    ///
    /// Nothing is written when `input.id` does not exist.
    pub async fn update(&self, input: UpdateCreature) -> Result<UniqueDinosaur, UniqueError> {
        let id = input.id;
        let updated = run_in_transaction(
            self.unit_of_work.as_ref(),
            &self.repositories,
            move |repos: UniqueRepositories| async move {
                let existing = repos
                    .query
                    .get(id)
                    .await
                    .map_err(|e| UniqueError::from_read(id, e))?;
                let dinosaur_id = existing.base().id();

                repos
                    .dinosaurs
                    .update(&input.dinosaur(dinosaur_id))
                    .await
                    .map_err(UniqueError::from_repo)?;
                repos
                    .uniques
                    .update(&input.unique(dinosaur_id))
                    .await
                    .map_err(|e| UniqueError::from_read(id, e))?;
                repos
                    .unique_variants
                    .replace(&input.variants())
                    .await
                    .map_err(UniqueError::from_repo)?;

                let updated = repos
                    .query
                    .get(id)
                    .await
                    .map_err(|e| UniqueError::from_read(id, e))?;
                Ok::<_, UniqueError>(updated)
            },
        )
        .await?;

        tracing::info!(unique_id = %id, "Unique dinosaur updated");
        Ok(updated)
    }

    /// Remove the variant pair, the unique row and its base creature.
    ///
    /// Nothing is deleted when `id` does not exist.
    pub async fn delete(&self, id: UniqueDinosaurId) -> Result<(), UniqueError> {
        run_in_transaction_unit(
            self.unit_of_work.as_ref(),
            &self.repositories,
            move |repos: UniqueRepositories| async move {
                let existing = repos
                    .query
                    .get(id)
                    .await
                    .map_err(|e| UniqueError::from_read(id, e))?;

                repos
                    .unique_variants
                    .delete(id)
                    .await
                    .map_err(UniqueError::from_repo)?;
                repos
                    .uniques
                    .delete(id)
                    .await
                    .map_err(UniqueError::from_repo)?;
                repos
                    .dinosaurs
                    .delete(existing.base().id())
                    .await
                    .map_err(UniqueError::from_repo)?;
                Ok::<_, UniqueError>(())
            },
        )
        .await?;

        tracing::info!(unique_id = %id, "Unique dinosaur deleted");
        Ok(())
    }
}
