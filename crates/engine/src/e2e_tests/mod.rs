//! Backend E2E integration tests.
//!
//! These tests drive the full `App` against a real Postgres started with
//! testcontainers.
//!
//! # Running E2E Tests
//!
//! ```bash
//! # Requires Docker
//! cargo test -p omega-engine --lib e2e_tests -- --ignored --test-threads=1
//! ```

mod postgres_test_harness;
mod variant_flow_tests;

pub use postgres_test_harness::*;
