//! API layer - HTTP entry points.

pub mod dto;
pub mod http;
