//! Persistence collaborator
//!
//! The core never talks to storage directly; it goes through these traits.
//! Two implementations ship with the crate:
//! - [`MemoryRepository`]: in-process maps, for tests and embedding callers
//! - [`PgRepository`]: PostgreSQL via sqlx

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    PricingConfig, SetupSectionConfig, SetupSectionProgress, StoredPricingConfig,
    StudioSetupStatus,
};
use thiserror::Error;

use crate::audit::AuditEntry;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row".to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Repository error");
                AppError::database(msg)
            }
            RepoError::Serialization(msg) => {
                AppError::with_message(ErrorCode::StudioSnapshotInvalid, msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Storage seam of the setup-completeness framework
#[async_trait]
pub trait SetupRepository: Send + Sync {
    /// Nested read of one studio: configurations, contact fields, socials,
    /// commercial terms, services and users. `NotFound` if the studio is missing.
    async fn load_studio_snapshot(&self, studio_id: i64) -> RepoResult<Value>;

    /// Section catalog entries with `is_active = true`
    async fn load_active_section_configs(&self) -> RepoResult<Vec<SetupSectionConfig>>;

    /// Create-or-update the status row of a studio. Returned without sections.
    async fn upsert_setup_status(
        &self,
        studio_id: i64,
        overall_progress: i32,
        is_fully_configured: bool,
        now: i64,
    ) -> RepoResult<StudioSetupStatus>;

    /// Delete every section row of the status, then insert `sections`
    async fn replace_section_progress(
        &self,
        setup_status_id: i64,
        sections: &[SetupSectionProgress],
    ) -> RepoResult<()>;

    /// Persisted status with its section rows, if the studio was ever validated
    async fn find_setup_status(&self, studio_id: i64) -> RepoResult<Option<StudioSetupStatus>>;

    async fn append_audit_log(&self, entry: &AuditEntry) -> RepoResult<()>;
}

/// Storage seam of pricing configuration
#[async_trait]
pub trait PricingConfigRepository: Send + Sync {
    /// The single active configuration of a studio
    async fn find_active_pricing_config(
        &self,
        studio_id: i64,
    ) -> RepoResult<Option<StoredPricingConfig>>;

    /// Store a new active configuration; the previous active one is marked
    /// superseded and kept for history.
    async fn save_pricing_config(
        &self,
        studio_id: i64,
        config: PricingConfig,
        now: i64,
    ) -> RepoResult<StoredPricingConfig>;
}
