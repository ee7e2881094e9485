//! Inputs for unique creature writes.

use omega_domain::{
    DinosaurId, DinosaurName, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueDinosaurId, UniqueName, VariantId, UNIQUE_VARIANT_COUNT,
};

use crate::infrastructure::ports::{
    CreateDinosaur, CreateUniqueDinosaur, UniqueVariantLinks, UpdateDinosaur,
    UpdateUniqueDinosaur,
};

/// A new unique form together with the base creature it is built on.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCreature {
    pub base_name: DinosaurName,
    pub base_health: Health,
    pub base_melee: Melee,
    pub name: UniqueName,
    pub health_multiplier: HealthMultiplier,
    pub damage_multiplier: MeleeMultiplier,
    pub variant_ids: [VariantId; UNIQUE_VARIANT_COUNT],
}

impl CreateCreature {
    pub(crate) fn dinosaur(&self) -> CreateDinosaur {
        CreateDinosaur {
            name: self.base_name.clone(),
            health: self.base_health,
            melee: self.base_melee,
        }
    }

    pub(crate) fn unique(&self, dinosaur_id: DinosaurId) -> CreateUniqueDinosaur {
        CreateUniqueDinosaur {
            dinosaur_id,
            name: self.name.clone(),
            health_multiplier: self.health_multiplier,
            damage_multiplier: self.damage_multiplier,
        }
    }

    pub(crate) fn variants(&self, unique_id: UniqueDinosaurId) -> UniqueVariantLinks {
        UniqueVariantLinks {
            unique_id,
            variant_ids: self.variant_ids,
        }
    }
}

/// Full replacement of an existing unique form and its base creature.
///
/// The base creature's id is taken from the stored aggregate, never from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCreature {
    pub id: UniqueDinosaurId,
    pub base_name: DinosaurName,
    pub base_health: Health,
    pub base_melee: Melee,
    pub name: UniqueName,
    pub health_multiplier: HealthMultiplier,
    pub damage_multiplier: MeleeMultiplier,
    pub variant_ids: [VariantId; UNIQUE_VARIANT_COUNT],
}

impl UpdateCreature {
    pub(crate) fn dinosaur(&self, dinosaur_id: DinosaurId) -> UpdateDinosaur {
        UpdateDinosaur {
            id: dinosaur_id,
            name: self.base_name.clone(),
            health: self.base_health,
            melee: self.base_melee,
        }
    }

    pub(crate) fn unique(&self, dinosaur_id: DinosaurId) -> UpdateUniqueDinosaur {
        UpdateUniqueDinosaur {
            id: self.id,
            dinosaur_id,
            name: self.name.clone(),
            health_multiplier: self.health_multiplier,
            damage_multiplier: self.damage_multiplier,
        }
    }

    pub(crate) fn variants(&self) -> UniqueVariantLinks {
        UniqueVariantLinks {
            unique_id: self.id,
            variant_ids: self.variant_ids,
        }
    }
}
