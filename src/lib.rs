//! Wegram wallet — identity bootstrap and persistence.
//!
//! The binary entry point is src/main.rs; this root exposes the same modules
//! to integration tests and embedding hosts.

pub mod bootstrap;
pub mod core;
pub mod wallet;

pub use crate::core::{config, error};
