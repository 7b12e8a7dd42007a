//! Identity section: name, slug and presentation fields

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{check_field, completion_percentage, is_valid_slug, str_at};

const REQUIRED: [&str; 2] = ["name", "slug"];
const OPTIONAL: [&str; 3] = ["logoUrl", "slogan", "description"];
const OPTIONAL_BONUS: f64 = 20.0;
const MIN_NAME_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityValidator;

impl SectionValidator for IdentityValidator {
    fn section_id(&self) -> SectionId {
        SectionId::Identity
    }

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError> {
        let mut result = ValidationResult::default();

        let required = REQUIRED
            .iter()
            .filter(|f| check_field(snapshot, f, true, &mut result))
            .count();
        let optional = OPTIONAL
            .iter()
            .filter(|f| check_field(snapshot, f, false, &mut result))
            .count();

        // Completeness and correctness are scored independently
        if str_at(snapshot, "name").is_some_and(|name| name.chars().count() < MIN_NAME_LEN) {
            result.push_error(format!(
                "Studio name must be at least {MIN_NAME_LEN} characters"
            ));
        }
        if let Some(slug) = str_at(snapshot, "slug").filter(|s| !is_valid_slug(s)) {
            result.push_error(format!(
                "Slug '{slug}' may only contain lowercase letters, digits and hyphens"
            ));
        }

        let required_pct = f64::from(completion_percentage(required, REQUIRED.len()));
        let bonus = OPTIONAL_BONUS * optional as f64 / OPTIONAL.len() as f64;
        result.completion_percentage = (required_pct + bonus).round().min(100.0) as u8;
        result.is_valid = !result.has_errors() && result.missing_fields.is_empty();

        Ok(result)
    }
}
