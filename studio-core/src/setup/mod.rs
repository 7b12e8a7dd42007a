//! Studio setup-completeness scoring
//!
//! 每个 section 由一个纯函数 validator 打分，aggregator 汇总为加权总进度并
//! 通过 [`SetupRepository`](crate::db::SetupRepository) 持久化。
//!
//! # 流程
//!
//! ```text
//! load snapshot ─┬─> validator(identity) ─┐
//!                ├─> validator(contact)  ─┤
//!                ├─> ...                  ├─> derive status ─> weighted score ─> persist
//!                └─> validator(services) ─┘
//! ```

pub mod aggregator;
pub mod catalog;
pub mod fields;
pub mod status;
pub mod validators;

pub use aggregator::{SetupCompletenessAggregator, SetupPolicy, run_setup_validation};
pub use status::{derive_status, overall_progress};
pub use validators::{SectionValidator, ValidatorKind};

use shared::error::{AppError, ErrorCode};
use shared::models::SectionId;
use thiserror::Error;

use crate::db::RepoError;

/// Setup framework errors
///
/// Validator failures are confined to their section; repository failures
/// fail the whole run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No validator implemented for section '{0}'")]
    ValidatorNotImplemented(SectionId),

    #[error("Validator for section '{section}' panicked: {message}")]
    ValidatorPanicked { section: SectionId, message: String },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl From<SetupError> for AppError {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::ValidatorNotImplemented(section) => {
                AppError::new(ErrorCode::SetupValidatorMissing)
                    .with_detail("section_id", section.as_str())
            }
            SetupError::ValidatorPanicked { section, message } => {
                AppError::with_message(ErrorCode::SetupSectionFailed, message)
                    .with_detail("section_id", section.as_str())
            }
            SetupError::Repository(RepoError::NotFound(what)) => {
                AppError::with_message(ErrorCode::StudioNotFound, format!("Not found: {what}"))
            }
            SetupError::Repository(e) => e.into(),
        }
    }
}
