//! Apex Core - Foundational types for the Apex racing runtime
//!
//! This crate provides the types all other Apex crates depend on:
//! - `Vec2` - 2D world-unit vector
//! - Error types and Result alias

mod error;
mod types;

pub use error::{ApexError, Result};
pub use types::Vec2;
