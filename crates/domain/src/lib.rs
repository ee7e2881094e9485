//! Omega domain - creature catalog types and invariants.
//!
//! Pure data with validated construction. Nothing here knows about storage or HTTP.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{UniqueDinosaur, UniqueVariants, UNIQUE_VARIANT_COUNT};
pub use entities::{Dinosaur, Variant, VariantGroup};
pub use error::DomainError;
pub use ids::{DinosaurId, UniqueDinosaurId, VariantGroupId, VariantId};
pub use value_objects::{
    DinosaurName, DinosaurStatus, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueMultipliedStatus, UniqueMultiplier, UniqueName, VariantGroupName, VariantName,
};
