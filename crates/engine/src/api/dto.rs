//! JSON request and response bodies.
//!
//! Requests carry raw values; conversion into domain inputs is where validation
//! happens, and its failures surface as `DomainError`.

use serde::{Deserialize, Serialize};

use omega_domain::{
    DinosaurName, DomainError, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueDinosaur, UniqueDinosaurId, UniqueName, Variant, VariantGroupName, VariantId,
    VariantName, UNIQUE_VARIANT_COUNT,
};

use crate::use_cases::unique::{CreateCreature, UpdateCreature};

// =============================================================================
// Unique creatures
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DinosaurBody {
    pub name: String,
    pub health: u32,
    pub melee: u32,
}

/// Body of `POST /api/v1/uniques/new` and `PUT /api/v1/uniques/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UniqueBody {
    pub dinosaur: DinosaurBody,
    pub name: String,
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
    pub variant_ids: Vec<i32>,
}

struct ValidatedUnique {
    base_name: DinosaurName,
    base_health: Health,
    base_melee: Melee,
    name: UniqueName,
    health_multiplier: HealthMultiplier,
    damage_multiplier: MeleeMultiplier,
    variant_ids: [VariantId; UNIQUE_VARIANT_COUNT],
}

impl UniqueBody {
    fn validate(self) -> Result<ValidatedUnique, DomainError> {
        let actual = self.variant_ids.len();
        let variant_ids: [i32; UNIQUE_VARIANT_COUNT] = self
            .variant_ids
            .try_into()
            .map_err(|_| DomainError::arity("variant ids", UNIQUE_VARIANT_COUNT, actual))?;

        Ok(ValidatedUnique {
            base_name: DinosaurName::new(self.dinosaur.name)?,
            base_health: Health::new(self.dinosaur.health)?,
            base_melee: Melee::new(self.dinosaur.melee),
            name: UniqueName::new(self.name)?,
            health_multiplier: HealthMultiplier::new(self.health_multiplier)?,
            damage_multiplier: MeleeMultiplier::new(self.damage_multiplier)?,
            variant_ids: variant_ids.map(VariantId::from_i32),
        })
    }

    pub fn into_create(self) -> Result<CreateCreature, DomainError> {
        let v = self.validate()?;
        Ok(CreateCreature {
            base_name: v.base_name,
            base_health: v.base_health,
            base_melee: v.base_melee,
            name: v.name,
            health_multiplier: v.health_multiplier,
            damage_multiplier: v.damage_multiplier,
            variant_ids: v.variant_ids,
        })
    }

    pub fn into_update(self, id: UniqueDinosaurId) -> Result<UpdateCreature, DomainError> {
        let v = self.validate()?;
        Ok(UpdateCreature {
            id,
            base_name: v.base_name,
            base_health: v.base_health,
            base_melee: v.base_melee,
            name: v.name,
            health_multiplier: v.health_multiplier,
            damage_multiplier: v.damage_multiplier,
            variant_ids: v.variant_ids,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DinosaurView {
    pub id: i32,
    pub name: String,
    pub health: u32,
    pub melee: u32,
}

/// A unique creature as shown to clients, including its multiplied stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueView {
    pub id: i32,
    pub name: String,
    pub dinosaur: DinosaurView,
    pub health_multiplier: f32,
    pub damage_multiplier: f32,
    /// Base health times the health multiplier.
    pub health: f32,
    /// Base melee times the damage multiplier.
    pub damage: f32,
    pub variants: Vec<Variant>,
}

impl From<&UniqueDinosaur> for UniqueView {
    fn from(unique: &UniqueDinosaur) -> Self {
        let base = unique.base();
        Self {
            id: unique.id().value(),
            name: unique.name().to_string(),
            dinosaur: DinosaurView {
                id: base.id().value(),
                name: base.name().to_string(),
                health: base.health().value(),
                melee: base.melee().value(),
            },
            health_multiplier: unique.health_multiplier().value(),
            damage_multiplier: unique.damage_multiplier().value(),
            health: unique.health().value(),
            damage: unique.damage().value(),
            variants: unique.variants().iter().cloned().collect(),
        }
    }
}

// =============================================================================
// Variant catalog
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct VariantGroupBody {
    pub name: String,
}

impl VariantGroupBody {
    pub fn into_name(self) -> Result<VariantGroupName, DomainError> {
        VariantGroupName::new(self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantBody {
    pub group_id: i32,
    pub name: String,
}

impl VariantBody {
    pub fn into_name(self) -> Result<VariantName, DomainError> {
        VariantName::new(self.name)
    }
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
