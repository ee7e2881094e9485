//! Variant catalog use cases for CRUD-style operations.
//!
//! Each operation is a single statement, so none of them needs a transaction.

use std::sync::Arc;

use omega_domain::{Variant, VariantGroup, VariantGroupId, VariantGroupName, VariantId, VariantName};

use crate::infrastructure::ports::{RepoError, VariantGroupRepo, VariantRepo};

/// Shared error type for variant catalog use cases.
#[derive(Debug, thiserror::Error)]
pub enum VariantError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl VariantError {
    fn from_repo(entity: &'static str, id: i32, err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound { entity, id },
            err if err.is_infrastructure() => Self::Internal(err.to_string()),
            err => Self::Repo(err),
        }
    }
}

impl From<RepoError> for VariantError {
    fn from(err: RepoError) -> Self {
        if err.is_infrastructure() {
            Self::Internal(err.to_string())
        } else {
            Self::Repo(err)
        }
    }
}

/// Container for variant catalog use cases.
pub struct VariantUseCases {
    pub group: VariantGroupCrud,
    pub variant: VariantCrud,
}

impl VariantUseCases {
    pub fn new(group: VariantGroupCrud, variant: VariantCrud) -> Self {
        Self { group, variant }
    }
}

// =============================================================================
// Variant group CRUD
// =============================================================================

pub struct VariantGroupCrud {
    repo: Arc<dyn VariantGroupRepo>,
}

impl VariantGroupCrud {
    const ENTITY: &'static str = "VariantGroup";

    pub fn new(repo: Arc<dyn VariantGroupRepo>) -> Self {
        Self { repo }
    }

    pub async fn find(&self, id: VariantGroupId) -> Result<VariantGroup, VariantError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| VariantError::from_repo(Self::ENTITY, id.value(), e))
    }

    pub async fn list(&self) -> Result<Vec<VariantGroup>, VariantError> {
        Ok(self.repo.list().await?)
    }

    pub async fn create(&self, name: VariantGroupName) -> Result<VariantGroup, VariantError> {
        let id = self.repo.insert(&name).await?;
        tracing::info!(group_id = %id, name = %name, "Variant group created");
        Ok(VariantGroup::new(id, name))
    }

    pub async fn update(
        &self,
        id: VariantGroupId,
        name: VariantGroupName,
    ) -> Result<VariantGroup, VariantError> {
        let group = VariantGroup::new(id, name);
        self.repo
            .update(&group)
            .await
            .map_err(|e| VariantError::from_repo(Self::ENTITY, id.value(), e))?;
        Ok(group)
    }

    pub async fn delete(&self, id: VariantGroupId) -> Result<(), VariantError> {
        self.find(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(group_id = %id, "Variant group deleted");
        Ok(())
    }
}

// =============================================================================
// Variant CRUD
// =============================================================================

pub struct VariantCrud {
    repo: Arc<dyn VariantRepo>,
}

impl VariantCrud {
    const ENTITY: &'static str = "Variant";

    pub fn new(repo: Arc<dyn VariantRepo>) -> Self {
        Self { repo }
    }

    pub async fn find(&self, id: VariantId) -> Result<Variant, VariantError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| VariantError::from_repo(Self::ENTITY, id.value(), e))
    }

    pub async fn list(&self) -> Result<Vec<Variant>, VariantError> {
        Ok(self.repo.list().await?)
    }

    /// Insert a variant into an existing group and return it with the group's name.
    pub async fn create(
        &self,
        group_id: VariantGroupId,
        name: VariantName,
    ) -> Result<Variant, VariantError> {
        let id = self.repo.insert(group_id, &name).await?;
        tracing::info!(variant_id = %id, group_id = %group_id, "Variant created");
        self.find(id).await
    }

    pub async fn update(
        &self,
        id: VariantId,
        group_id: VariantGroupId,
        name: VariantName,
    ) -> Result<Variant, VariantError> {
        self.repo
            .update(id, group_id, &name)
            .await
            .map_err(|e| VariantError::from_repo(Self::ENTITY, id.value(), e))?;
        self.find(id).await
    }

    pub async fn delete(&self, id: VariantId) -> Result<(), VariantError> {
        self.find(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(variant_id = %id, "Variant deleted");
        Ok(())
    }
}
