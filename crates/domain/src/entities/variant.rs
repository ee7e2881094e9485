//! Variant catalog entities
//!
//! A variant is a named trait that belongs to a named group, e.g. group "Cosmic",
//! variant "Singularity".

use serde::{Deserialize, Serialize};

use crate::value_objects::{VariantGroupName, VariantName};
use crate::{VariantGroupId, VariantId};

/// A group of variant traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    id: VariantGroupId,
    name: VariantGroupName,
}

impl VariantGroup {
    pub fn new(id: VariantGroupId, name: VariantGroupName) -> Self {
        Self { id, name }
    }

    #[inline]
    pub fn id(&self) -> VariantGroupId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &VariantGroupName {
        &self.name
    }
}

/// A variant trait, carried together with the name of its group for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    id: VariantId,
    group: VariantGroupName,
    name: VariantName,
}

impl Variant {
    pub fn new(id: VariantId, group: VariantGroupName, name: VariantName) -> Self {
        Self { id, group, name }
    }

    #[inline]
    pub fn id(&self) -> VariantId {
        self.id
    }

    #[inline]
    pub fn group(&self) -> &VariantGroupName {
        &self.group
    }

    #[inline]
    pub fn name(&self) -> &VariantName {
        &self.name
    }
}
