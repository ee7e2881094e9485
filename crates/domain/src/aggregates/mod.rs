//! Aggregates - Clusters of records that change as one consistent unit

pub mod unique_dinosaur;

pub use unique_dinosaur::{UniqueDinosaur, UniqueVariants, UNIQUE_VARIANT_COUNT};
