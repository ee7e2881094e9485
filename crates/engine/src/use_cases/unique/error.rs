//! Unique creature use case errors.

use omega_domain::UniqueDinosaurId;

use crate::infrastructure::ports::{RepoError, TransactionError};

#[derive(Debug, thiserror::Error)]
pub enum UniqueError {
    #[error("Unique dinosaur not found: {0}")]
    NotFound(UniqueDinosaurId),

    /// Storage or transaction failure. Details are logged, not shown to callers.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl UniqueError {
    /// Classify a failure of a write, or of a read that is not keyed by the caller's id.
    pub(crate) fn from_repo(err: RepoError) -> Self {
        if err.is_infrastructure() {
            Self::Internal(err.to_string())
        } else {
            Self::Repo(err)
        }
    }

    /// Classify a failure of a read of unique `id`.
    pub(crate) fn from_read(id: UniqueDinosaurId, err: RepoError) -> Self {
        if err.is_not_found() {
            Self::NotFound(id)
        } else {
            Self::from_repo(err)
        }
    }
}

impl From<TransactionError> for UniqueError {
    fn from(err: TransactionError) -> Self {
        Self::Internal(err.to_string())
    }
}
