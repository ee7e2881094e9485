//! Catalog entities

mod dinosaur;
mod variant;

pub use dinosaur::Dinosaur;
pub use variant::{Variant, VariantGroup};
