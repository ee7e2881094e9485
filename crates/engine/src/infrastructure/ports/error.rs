//! Error types for port operations.

use std::time::Duration;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A single statement ran past the configured query timeout.
    #[error("Database operation {operation} timed out")]
    Timeout { operation: &'static str },

    /// Row could not be decoded into a domain value.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage constraint violated (unique key, foreign key, check).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn timeout(operation: &'static str) -> Self {
        Self::Timeout { operation }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Failures of the storage itself rather than of the data sent to it.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Database { .. } | Self::Timeout { .. })
    }
}

/// Failures of the transaction machinery, as opposed to failures of the work it runs.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Failed to begin transaction: {0}")]
    Begin(RepoError),

    #[error("Failed to commit transaction: {0}")]
    Commit(RepoError),

    /// The unit of work panicked; the transaction was rolled back.
    #[error("Unit of work panicked: {0}")]
    Panicked(String),

    /// The unit of work did not finish in time; the transaction was rolled back.
    #[error("Unit of work exceeded {0:?}")]
    TimedOut(Duration),
}
