//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{UniqueRepositories, VariantGroupRepo, VariantRepo};
use crate::infrastructure::postgres::PostgresRepositories;
use crate::infrastructure::unit_of_work::UnitOfWork;
use crate::use_cases::unique::UniqueUseCases;
use crate::use_cases::variant::{VariantCrud, VariantGroupCrud, VariantUseCases};

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub unique: UniqueRepositories,
    pub variant: Arc<dyn VariantRepo>,
    pub variant_group: Arc<dyn VariantGroupRepo>,
}

impl From<&PostgresRepositories> for Repositories {
    fn from(repos: &PostgresRepositories) -> Self {
        Self {
            unique: repos.unique.clone(),
            variant: Arc::clone(&repos.variant),
            variant_group: Arc::clone(&repos.variant_group),
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub unique: UniqueUseCases,
    pub variant: VariantUseCases,
}

impl App {
    /// Without a unit of work, unique creature writes are not atomic.
    pub fn new(
        repositories: Repositories,
        unit_of_work: Option<UnitOfWork<UniqueRepositories>>,
    ) -> Self {
        if unit_of_work.is_none() {
            tracing::warn!("No transaction capability configured; unique writes are not atomic");
        }

        let use_cases = UseCases {
            unique: UniqueUseCases::new(repositories.unique.clone(), unit_of_work),
            variant: VariantUseCases::new(
                VariantGroupCrud::new(Arc::clone(&repositories.variant_group)),
                VariantCrud::new(Arc::clone(&repositories.variant)),
            ),
        };

        Self {
            repositories,
            use_cases,
        }
    }
}
