//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod ports;
pub mod postgres;
pub mod unit_of_work;

#[cfg(test)]
pub mod in_memory;
