//! Creature stats and unique-form multipliers.
//!
//! A unique creature's displayed stats are its base stats scaled by a per-stat
//! multiplier. The multiplier is tagged with the stat it belongs to, so a health
//! multiplier cannot be applied to a melee value, and the scaled result is its own
//! type so it can never be stored back as a base stat.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Health {}
    impl Sealed for super::Melee {}
}

/// A base stat that a [`UniqueMultiplier`] can scale.
///
/// Sealed: only [`Health`] and [`Melee`] implement it.
pub trait DinosaurStatus: sealed::Sealed + Copy + fmt::Debug {
    /// Short stat label used in error messages.
    const LABEL: &'static str;

    fn as_f32(self) -> f32;
}

// ============================================================================
// Health
// ============================================================================

/// Base health. Zero is not a valid creature state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Health(u32);

impl Health {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `value` is zero.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::validation("Health must be greater than zero"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Health {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Health> for u32 {
    fn from(health: Health) -> u32 {
        health.0
    }
}

impl DinosaurStatus for Health {
    const LABEL: &'static str = "health";

    fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

// ============================================================================
// Melee
// ============================================================================

/// Base melee damage. Zero is valid: some creatures cannot attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Melee(u32);

impl Melee {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn can_attack(&self) -> bool {
        self.0 > 0
    }
}

impl From<u32> for Melee {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Melee> for u32 {
    fn from(melee: Melee) -> u32 {
        melee.0
    }
}

impl DinosaurStatus for Melee {
    const LABEL: &'static str = "melee";

    fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

// ============================================================================
// UniqueMultiplier
// ============================================================================

/// Strictly positive scale factor for one stat of a unique creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniqueMultiplier<S: DinosaurStatus> {
    value: f32,
    _stat: PhantomData<S>,
}

/// Multiplier applied to [`Health`].
pub type HealthMultiplier = UniqueMultiplier<Health>;

/// Multiplier applied to [`Melee`] (the damage multiplier).
pub type MeleeMultiplier = UniqueMultiplier<Melee>;

impl<S: DinosaurStatus> UniqueMultiplier<S> {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `value` is not a finite number
    /// greater than zero.
    pub fn new(value: f32) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::validation(format!(
                "Unique {} multiplier must be a finite number greater than zero, got {value}",
                S::LABEL
            )));
        }
        Ok(Self {
            value,
            _stat: PhantomData,
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Scale a base stat of the same kind.
    pub fn multiply(&self, base: S) -> UniqueMultipliedStatus<S> {
        UniqueMultipliedStatus {
            value: base.as_f32() * self.value,
            _stat: PhantomData,
        }
    }
}

impl<S: DinosaurStatus> TryFrom<f32> for UniqueMultiplier<S> {
    type Error = DomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<S: DinosaurStatus> fmt::Display for UniqueMultiplier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.value)
    }
}

// ============================================================================
// UniqueMultipliedStatus
// ============================================================================

/// A base stat after applying its unique multiplier.
///
/// There is deliberately no conversion back into [`Health`] or [`Melee`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UniqueMultipliedStatus<S: DinosaurStatus> {
    value: f32,
    _stat: PhantomData<S>,
}

impl<S: DinosaurStatus> UniqueMultipliedStatus<S> {
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl<S: DinosaurStatus> fmt::Display for UniqueMultipliedStatus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
