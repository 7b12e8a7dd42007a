//! Service catalog section

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{as_number, is_active, records};

const FIELD: &str = "services";
const CONFIGURED_SCORE: u8 = 10;
const ACTIVE_SCORE: u8 = 25;
const BASE_SCORE: u32 = 50;
const PER_VALID_SERVICE: u32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesValidator;

impl SectionValidator for ServicesValidator {
    fn section_id(&self) -> SectionId {
        SectionId::Services
    }

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError> {
        let mut result = ValidationResult::default();

        let services = match records(snapshot, FIELD) {
            Some(services) if !services.is_empty() => services,
            _ => {
                result.mark_missing(FIELD);
                return Ok(result);
            }
        };
        result.mark_completed(FIELD);

        let mut active = 0usize;
        let mut valid = 0u32;
        for (index, service) in services.iter().enumerate().filter(|(_, s)| is_active(s)) {
            active += 1;

            let name = service
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty());
            let price = service.get("price").and_then(as_number);

            match (name, price) {
                (Some(_), Some(p)) if p > 0.0 => valid = valid.saturating_add(1),
                (None, _) => result.push_error(format!("Service #{} has no name", index + 1)),
                (Some(name), _) => {
                    result.push_error(format!("Service '{name}' must have a price greater than 0"))
                }
            }
        }

        result.completion_percentage = match (active, valid) {
            (0, _) => CONFIGURED_SCORE,
            (_, 0) => ACTIVE_SCORE,
            (_, n) => valid_services_score(n),
        };
        result.is_valid = !result.has_errors() && valid > 0;

        Ok(result)
    }
}

/// 50 + 10 per valid service, capped at 100
fn valid_services_score(valid: u32) -> u8 {
    BASE_SCORE
        .saturating_add(PER_VALID_SERVICE.saturating_mul(valid))
        .min(100) as u8
}
