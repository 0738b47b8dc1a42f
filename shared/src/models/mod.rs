//! Data models
//!
//! Shared between gift-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUIDv4 strings (SQLite TEXT PRIMARY KEY); timestamps are
//! epoch milliseconds. Wire field names are camelCase.

pub mod client;
pub mod gift;

// Re-exports
pub use client::*;
pub use gift::*;
