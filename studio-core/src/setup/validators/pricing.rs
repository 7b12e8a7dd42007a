//! Pricing section
//!
//! Inspects the `type = "pricing"` entry of the studio configuration list.

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{as_number, completion_percentage, is_active, is_present, records};

const ENTRY_FIELD: &str = "configurations.pricing";
const BASE_MARGIN: &str = "margenBase";
const HEADROOM: &str = "sobreprecio";
const MAX_DISCOUNT: &str = "descuentoMaximo";
const MIN_VALID_SCORE: u8 = 80;

#[derive(Debug, Clone, Copy, Default)]
pub struct PricingValidator;

/// First active configuration entry of type "pricing"
fn pricing_entry(snapshot: &Value) -> Option<&Value> {
    records(snapshot, "configurations")?.iter().find(|entry| {
        entry.get("type").and_then(Value::as_str) == Some("pricing") && is_active(entry)
    })
}

impl SectionValidator for PricingValidator {
    fn section_id(&self) -> SectionId {
        SectionId::Pricing
    }

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError> {
        let mut result = ValidationResult::default();

        let Some(entry) = pricing_entry(snapshot) else {
            result.mark_missing(ENTRY_FIELD);
            return Ok(result);
        };
        result.mark_completed(ENTRY_FIELD);

        let fields = [BASE_MARGIN, HEADROOM, MAX_DISCOUNT];
        let mut valid = 0;
        for field in fields {
            let path = format!("pricing.{field}");
            let raw = entry.get(field);
            if !is_present(raw) {
                result.mark_missing(path);
                continue;
            }

            let Some(value) = raw.and_then(as_number) else {
                result.push_error(format!("Pricing field '{field}' must be a number"));
                continue;
            };
            if value < 0.0 {
                result.push_error(format!("Pricing field '{field}' cannot be negative ({value})"));
                continue;
            }
            if field == BASE_MARGIN && value == 0.0 {
                result.push_error(format!("Pricing field '{field}' must be greater than 0"));
                continue;
            }

            valid += 1;
            result.mark_completed(path);
        }

        result.completion_percentage = completion_percentage(valid, fields.len());
        result.is_valid =
            !result.has_errors() && result.completion_percentage >= MIN_VALID_SCORE;

        Ok(result)
    }
}
