//! Commercial terms section

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{as_number, is_active, is_present, records};

const FIELD: &str = "commercialTerms";
const PERCENTAGE_FIELDS: [&str; 2] = ["discountPercentage", "advancePercentage"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CommercialTermsValidator;

impl SectionValidator for CommercialTermsValidator {
    fn section_id(&self) -> SectionId {
        SectionId::CommercialTerms
    }

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError> {
        let mut result = ValidationResult::default();

        let terms = match records(snapshot, FIELD) {
            Some(terms) if !terms.is_empty() => terms,
            _ => {
                result.mark_missing(FIELD);
                return Ok(result);
            }
        };
        result.mark_completed(FIELD);

        let mut has_active = false;
        for (index, term) in terms.iter().enumerate() {
            let name = term
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty());
            if name.is_some() && is_active(term) {
                has_active = true;
            }

            let label = name.map_or_else(|| format!("#{}", index + 1), |n| format!("'{n}'"));
            for field in PERCENTAGE_FIELDS {
                let raw = term.get(field);
                if !is_present(raw) {
                    continue;
                }
                match raw.and_then(as_number) {
                    Some(pct) if (0.0..=100.0).contains(&pct) => {}
                    Some(pct) => result.push_error(format!(
                        "Commercial term {label}: {field} must be between 0 and 100 ({pct})"
                    )),
                    None => result.push_error(format!(
                        "Commercial term {label}: {field} must be a number"
                    )),
                }
            }
        }

        result.completion_percentage = if has_active { 100 } else { 25 };
        result.is_valid = !result.has_errors() && has_active;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(snapshot: Value) -> ValidationResult {
        CommercialTermsValidator.validate(&snapshot).unwrap()
    }

    #[test]
    fn test_absent_collection_scores_zero() {
        for snapshot in [json!({}), json!({ "commercialTerms": [] })] {
            let result = validate(snapshot);
            assert_eq!(result.completion_percentage, 0);
            assert_eq!(result.missing_fields, vec![FIELD]);
            assert!(!result.is_valid);
        }
    }

    #[test]
    fn test_active_term_scores_full() {
        let result = validate(json!({
            "commercialTerms": [
                { "name": "Contado", "isActive": true, "discountPercentage": 10, "advancePercentage": 0 },
                { "name": "50/50", "isActive": false, "discountPercentage": 0, "advancePercentage": 50 }
            ]
        }));
        assert_eq!(result.completion_percentage, 100);
        assert!(result.is_valid);
    }

    #[test]
    fn test_configured_but_none_active() {
        let result = validate(json!({
            "commercialTerms": [
                { "name": "Contado", "isActive": false },
                { "name": "", "isActive": true }
            ]
        }));
        assert_eq!(result.completion_percentage, 25);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_out_of_range_percentages() {
        let result = validate(json!({
            "commercialTerms": [
                { "name": "Contado", "discountPercentage": 120, "advancePercentage": -1 },
                { "name": "Plazos", "discountPercentage": "5", "advancePercentage": 100 }
            ]
        }));
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("'Contado'"));
        assert_eq!(result.completion_percentage, 100);
        assert!(!result.is_valid);
    }
}
