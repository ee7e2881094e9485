//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific catalog area.

pub mod unique;
pub mod variant;

pub use unique::{UniqueError, UniqueUseCases};
pub use variant::{VariantError, VariantUseCases};
