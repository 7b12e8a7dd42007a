//! Placeholder for catalog sections that have no validator yet

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;

/// Always fails, so an unconfigured section shows up as `error` instead of
/// borrowing another section's score.
#[derive(Debug, Clone)]
pub struct UnimplementedValidator {
    section_id: SectionId,
}

impl UnimplementedValidator {
    pub fn new(section_id: SectionId) -> Self {
        Self { section_id }
    }
}

impl SectionValidator for UnimplementedValidator {
    fn section_id(&self) -> SectionId {
        self.section_id.clone()
    }

    fn validate(&self, _snapshot: &Value) -> Result<ValidationResult, SetupError> {
        Err(SetupError::ValidatorNotImplemented(self.section_id.clone()))
    }
}
