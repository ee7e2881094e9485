//! UniqueDinosaur aggregate - A boss/variant form of a base creature
//!
//! # Invariants
//!
//! - The base creature is held by value (`base`), never by reference
//! - Exactly two variants (enforced by [`UniqueVariants`])
//! - Both multipliers are strictly positive (enforced by [`UniqueMultiplier`])
//!
//! Displayed stats are derived on read: [`UniqueDinosaur::health`] and
//! [`UniqueDinosaur::damage`] return [`UniqueMultipliedStatus`] values, which cannot
//! be stored back into the base record.
//!
//! # Example
//!
//! ```
//! use omega_domain::aggregates::{UniqueDinosaur, UniqueVariants};
//! use omega_domain::entities::{Dinosaur, Variant};
//! use omega_domain::value_objects::*;
//! use omega_domain::{DinosaurId, UniqueDinosaurId, VariantId};
//!
//! let base = Dinosaur::new(
//!     DinosaurId::from_i32(1),
//!     DinosaurName::new("Dodo").unwrap(),
//!     Health::new(2).unwrap(),
//!     Melee::new(2),
//! );
//! let variants = UniqueVariants::new([
//!     Variant::new(
//!         VariantId::from_i32(1),
//!         VariantGroupName::new("Cosmic").unwrap(),
//!         VariantName::new("Singularity").unwrap(),
//!     ),
//!     Variant::new(
//!         VariantId::from_i32(2),
//!         VariantGroupName::new("Nature").unwrap(),
//!         VariantName::new("Thunderstorm").unwrap(),
//!     ),
//! ]);
//! let kenny = UniqueDinosaur::new(
//!     base,
//!     UniqueDinosaurId::from_i32(1),
//!     UniqueName::new("Kenny").unwrap(),
//!     HealthMultiplier::new(36.0).unwrap(),
//!     MeleeMultiplier::new(36.0).unwrap(),
//!     variants,
//! );
//!
//! assert_eq!(kenny.health().value(), 72.0);
//! assert_eq!(kenny.damage().value(), 72.0);
//! ```

use crate::entities::{Dinosaur, Variant};
use crate::error::DomainError;
use crate::value_objects::{
    Health, HealthMultiplier, Melee, MeleeMultiplier, UniqueMultipliedStatus, UniqueName,
};
use crate::{UniqueDinosaurId, VariantId};

/// Number of variants every unique form carries.
pub const UNIQUE_VARIANT_COUNT: usize = 2;

/// The fixed pair of variants that defines a unique form.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueVariants([Variant; UNIQUE_VARIANT_COUNT]);

impl UniqueVariants {
    pub fn new(variants: [Variant; UNIQUE_VARIANT_COUNT]) -> Self {
        Self(variants)
    }

    /// Build from a collection read back from storage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arity` unless exactly two variants are given.
    pub fn try_from_vec(variants: Vec<Variant>) -> Result<Self, DomainError> {
        let actual = variants.len();
        <[Variant; UNIQUE_VARIANT_COUNT]>::try_from(variants)
            .map(Self)
            .map_err(|_| DomainError::arity("variants", UNIQUE_VARIANT_COUNT, actual))
    }

    pub fn as_slice(&self) -> &[Variant] {
        &self.0
    }

    pub fn ids(&self) -> [VariantId; UNIQUE_VARIANT_COUNT] {
        [self.0[0].id(), self.0[1].id()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.0.iter()
    }
}

/// A unique (boss/variant) form of a base creature.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueDinosaur {
    base: Dinosaur,
    id: UniqueDinosaurId,
    name: UniqueName,
    health_multiplier: HealthMultiplier,
    damage_multiplier: MeleeMultiplier,
    variants: UniqueVariants,
}

impl UniqueDinosaur {
    pub fn new(
        base: Dinosaur,
        id: UniqueDinosaurId,
        name: UniqueName,
        health_multiplier: HealthMultiplier,
        damage_multiplier: MeleeMultiplier,
        variants: UniqueVariants,
    ) -> Self {
        Self {
            base,
            id,
            name,
            health_multiplier,
            damage_multiplier,
            variants,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> UniqueDinosaurId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &UniqueName {
        &self.name
    }

    /// The base creature snapshot this form is built on.
    #[inline]
    pub fn base(&self) -> &Dinosaur {
        &self.base
    }

    #[inline]
    pub fn health_multiplier(&self) -> HealthMultiplier {
        self.health_multiplier
    }

    #[inline]
    pub fn damage_multiplier(&self) -> MeleeMultiplier {
        self.damage_multiplier
    }

    #[inline]
    pub fn variants(&self) -> &UniqueVariants {
        &self.variants
    }

    // =========================================================================
    // Derived stats
    // =========================================================================

    /// Base health scaled by the health multiplier.
    pub fn health(&self) -> UniqueMultipliedStatus<Health> {
        self.health_multiplier.multiply(self.base.health())
    }

    /// Base melee scaled by the damage multiplier.
    pub fn damage(&self) -> UniqueMultipliedStatus<Melee> {
        self.damage_multiplier.multiply(self.base.melee())
    }
}
