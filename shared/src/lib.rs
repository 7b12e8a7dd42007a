//! Shared types for the studio platform
//!
//! Value types used by both the computation core (`studio-core`) and the
//! CRUD layer that embeds it: pricing and setup models, the unified error
//! system, and small time/id helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
