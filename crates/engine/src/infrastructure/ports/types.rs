//! Write records passed to the command repositories.
//!
//! Every field is already a validated domain value, so adapters only map columns.

use omega_domain::{
    DinosaurId, DinosaurName, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueDinosaurId, UniqueName, VariantId, UNIQUE_VARIANT_COUNT,
};

// =============================================================================
// Base creature
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CreateDinosaur {
    pub name: DinosaurName,
    pub health: Health,
    pub melee: Melee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateDinosaur {
    pub id: DinosaurId,
    pub name: DinosaurName,
    pub health: Health,
    pub melee: Melee,
}

// =============================================================================
// Unique form
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUniqueDinosaur {
    pub dinosaur_id: DinosaurId,
    pub name: UniqueName,
    pub health_multiplier: HealthMultiplier,
    pub damage_multiplier: MeleeMultiplier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateUniqueDinosaur {
    pub id: UniqueDinosaurId,
    pub dinosaur_id: DinosaurId,
    pub name: UniqueName,
    pub health_multiplier: HealthMultiplier,
    pub damage_multiplier: MeleeMultiplier,
}

/// The ordered variant pair attached to a unique form. Slot order is kept on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueVariantLinks {
    pub unique_id: UniqueDinosaurId,
    pub variant_ids: [VariantId; UNIQUE_VARIANT_COUNT],
}
