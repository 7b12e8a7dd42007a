//! Contact section: email, phone, address, website

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{
    check_field, completion_percentage, is_valid_email, is_valid_phone, is_valid_url, str_at,
};

const REQUIRED: [&str; 1] = ["email"];
const OPTIONAL: [&str; 3] = ["phone", "address", "website"];
const OPTIONAL_BONUS: f64 = 30.0;
/// Score ceiling while any format error is present
const FORMAT_ERROR_CAP: u8 = 95;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactValidator;

impl SectionValidator for ContactValidator {
    fn section_id(&self) -> SectionId {
        SectionId::Contact
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

        if let Some(email) = str_at(snapshot, "email").filter(|e| !is_valid_email(e)) {
            result.push_error(format!("Invalid email address '{email}'"));
        }
        if let Some(phone) = str_at(snapshot, "phone").filter(|p| !is_valid_phone(p)) {
            result.push_error(format!(
                "Invalid phone number '{phone}': expected 10 digits with optional country code"
            ));
        }
        if let Some(website) = str_at(snapshot, "website").filter(|w| !is_valid_url(w)) {
            result.push_error(format!("Invalid website URL '{website}'"));
        }

        let required_pct = f64::from(completion_percentage(required, REQUIRED.len()));
        let bonus = OPTIONAL_BONUS * optional as f64 / OPTIONAL.len() as f64;
        let mut score = (required_pct + bonus).round().min(100.0) as u8;
        if result.has_errors() {
            score = score.min(FORMAT_ERROR_CAP);
        }

        result.completion_percentage = score;
        result.is_valid = !result.has_errors() && result.missing_fields.is_empty();

        Ok(result)
    }
}
