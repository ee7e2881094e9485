//! Repository port traits for database access.

use std::sync::Arc;

use async_trait::async_trait;
use omega_domain::{
    DinosaurId, UniqueDinosaur, UniqueDinosaurId, Variant, VariantGroup, VariantGroupId,
    VariantGroupName, VariantId, VariantName,
};

use super::error::RepoError;
use super::types::{
    CreateDinosaur, CreateUniqueDinosaur, UniqueVariantLinks, UpdateDinosaur,
    UpdateUniqueDinosaur,
};

// =============================================================================
// Unique creature ports (written together inside one transaction)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DinosaurCommandRepo: Send + Sync {
    async fn insert(&self, dinosaur: &CreateDinosaur) -> Result<DinosaurId, RepoError>;
    async fn update(&self, dinosaur: &UpdateDinosaur) -> Result<(), RepoError>;
    async fn delete(&self, id: DinosaurId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniqueCommandRepo: Send + Sync {
    async fn insert(&self, unique: &CreateUniqueDinosaur) -> Result<UniqueDinosaurId, RepoError>;
    async fn update(&self, unique: &UpdateUniqueDinosaur) -> Result<(), RepoError>;
    async fn delete(&self, id: UniqueDinosaurId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniqueVariantsCommandRepo: Send + Sync {
    async fn insert(&self, links: &UniqueVariantLinks) -> Result<(), RepoError>;
    /// Replace whatever pair is stored for `links.unique_id`.
    async fn replace(&self, links: &UniqueVariantLinks) -> Result<(), RepoError>;
    async fn delete(&self, unique_id: UniqueDinosaurId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniqueQueryRepo: Send + Sync {
    /// Full aggregate read. Fails with `RepoError::NotFound` when `id` is unknown.
    async fn get(&self, id: UniqueDinosaurId) -> Result<UniqueDinosaur, RepoError>;
    async fn list(&self) -> Result<Vec<UniqueDinosaur>, RepoError>;
}

/// The repositories one unique-creature operation works against.
///
/// Cloning is cheap. Inside a transaction every member is bound to the same session.
#[derive(Clone)]
pub struct UniqueRepositories {
    pub dinosaurs: Arc<dyn DinosaurCommandRepo>,
    pub uniques: Arc<dyn UniqueCommandRepo>,
    pub unique_variants: Arc<dyn UniqueVariantsCommandRepo>,
    pub query: Arc<dyn UniqueQueryRepo>,
}

// =============================================================================
// Variant catalog ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VariantGroupRepo: Send + Sync {
    async fn get(&self, id: VariantGroupId) -> Result<VariantGroup, RepoError>;
    async fn list(&self) -> Result<Vec<VariantGroup>, RepoError>;
    async fn insert(&self, name: &VariantGroupName) -> Result<VariantGroupId, RepoError>;
    async fn update(&self, group: &VariantGroup) -> Result<(), RepoError>;
    async fn delete(&self, id: VariantGroupId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VariantRepo: Send + Sync {
    async fn get(&self, id: VariantId) -> Result<Variant, RepoError>;
    async fn list(&self) -> Result<Vec<Variant>, RepoError>;
    async fn insert(
        &self,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<VariantId, RepoError>;
    async fn update(
        &self,
        id: VariantId,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<(), RepoError>;
    async fn delete(&self, id: VariantId) -> Result<(), RepoError>;
}
