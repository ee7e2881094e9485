//! Omega Engine library.
//!
//! This crate contains all server-side code for the creature catalog.
//!
//! ## Structure
//!
//! - `use_cases/` - Catalog operations; unique creatures are written transactionally
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// E2E integration tests using real Postgres via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
