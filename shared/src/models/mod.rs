//! Data models
//!
//! Shared between studio-core and the CRUD layer (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes.

pub mod pricing;
pub mod quote;
pub mod setup;

// Re-exports
pub use pricing::*;
pub use quote::*;
pub use setup::*;
