//! Shared types for the gift invitation service
//!
//! Entity models and wire DTOs used by the server (and any future API
//! clients), plus small utilities for timestamps, IDs and invite tokens.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
