//! Unified error types for the domain layer
//!
//! Value objects and entities report invariant violations through [`DomainError`],
//! so adapters and use cases never have to parse strings to classify a failure.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// A collection did not have the required number of elements
    #[error("Expected exactly {expected} {what}, got {actual}")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a value object's construction invariant does not hold:
    /// - Required names are empty
    /// - Stats or multipliers are outside their allowed range
    ///
    /// # Example
    /// ```ignore
    /// if value == 0 {
    ///     return Err(DomainError::validation("Health must be greater than zero"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Create an arity error
    pub fn arity(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::Arity {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_preserved() {
        let err = DomainError::validation("Health must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Validation failed: Health must be greater than zero"
        );
    }

    #[test]
    fn arity_error_describes_counts() {
        let err = DomainError::arity("variants", 2, 3);
        assert_eq!(err.to_string(), "Expected exactly 2 variants, got 3");
    }
}
