//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (Postgres in production, in-memory in tests)
//! - Transactions (so use cases can group writes without knowing the driver)

mod error;
mod repos;
mod transaction;
pub mod types;

pub use error::{RepoError, TransactionError};
pub use repos::*;
pub use transaction::{Transactioner, TxSession};
pub use types::{
    CreateDinosaur, CreateUniqueDinosaur, UniqueVariantLinks, UpdateDinosaur,
    UpdateUniqueDinosaur,
};
