//! Dinosaur entity - A base creature template

use crate::value_objects::{DinosaurName, Health, Melee};
use crate::DinosaurId;

/// A base creature species.
///
/// Unique forms hold a copy of this record (taken from the joined read), not a live
/// reference to the stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dinosaur {
    id: DinosaurId,
    name: DinosaurName,
    health: Health,
    melee: Melee,
}

impl Dinosaur {
    pub fn new(id: DinosaurId, name: DinosaurName, health: Health, melee: Melee) -> Self {
        Self {
            id,
            name,
            health,
            melee,
        }
    }

    #[inline]
    pub fn id(&self) -> DinosaurId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &DinosaurName {
        &self.name
    }

    /// Base health, before any unique multiplier.
    #[inline]
    pub fn health(&self) -> Health {
        self.health
    }

    /// Base melee, before any unique multiplier.
    #[inline]
    pub fn melee(&self) -> Melee {
        self.melee
    }
}
