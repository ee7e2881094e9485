//! Value objects - Immutable objects defined by their attributes

mod names;
mod stats;

pub use names::{DinosaurName, UniqueName, VariantGroupName, VariantName};
pub use stats::{
    DinosaurStatus, Health, HealthMultiplier, Melee, MeleeMultiplier, UniqueMultipliedStatus,
    UniqueMultiplier,
};
