//! Bootstrap layer — modules that run before anything else reads state.
//!
//! - **identity** — wallet identity load-or-generate and persistence.
//! - **logger** — tracing-subscriber initialisation.

pub mod identity;
pub mod logger;
