use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Storage-assigned integer identifiers.
///
/// Ids are only ever minted by the relational store (`SERIAL` columns), so there is
/// no `new()`; adapters wrap the value they read back.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const fn from_i32(value: i32) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self).map_err(|e| {
                    DomainError::invalid_id(format!("{}: {s:?} ({e})", stringify!($name)))
                })
            }
        }
    };
}

// Creature IDs
define_id!(DinosaurId);
define_id!(UniqueDinosaurId);

// Variant catalog IDs
define_id!(VariantId);
define_id!(VariantGroupId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids() {
        let id: UniqueDinosaurId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn rejects_non_integer_ids() {
        let err = "kenny".parse::<DinosaurId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&VariantId::from_i32(7)).unwrap();
        assert_eq!(json, "7");
    }
}
