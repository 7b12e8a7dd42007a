//! Social presence section

use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SectionValidator;
use crate::setup::SetupError;
use crate::setup::fields::{is_active, is_valid_url, records};

const FIELD: &str = "socialNetworks";

#[derive(Debug, Clone, Copy, Default)]
pub struct SocialPresenceValidator;

impl SectionValidator for SocialPresenceValidator {
    fn section_id(&self) -> SectionId {
        SectionId::Social
    }

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError> {
        let mut result = ValidationResult::default();
        let links = records(snapshot, FIELD).unwrap_or_default();

        let mut active = 0usize;
        for link in links {
            let url = link
                .get("url")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|u| !u.is_empty());
            let Some(url) = url else {
                continue;
            };

            if is_active(link) {
                active += 1;
            }
            // Format is checked on every configured link, active or not
            if !is_valid_url(url) {
                let platform = link
                    .get("platform")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                result.push_error(format!("Invalid URL for {platform} link: '{url}'"));
            }
        }

        if active > 0 {
            result.mark_completed(FIELD);
        }
        result.completion_percentage = match active {
            0 => 0,
            1 => 50,
            _ => 100,
        };
        result.is_valid = !result.has_errors();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(snapshot: Value) -> ValidationResult {
        SocialPresenceValidator.validate(&snapshot).unwrap()
    }

    #[test]
    fn test_two_active_links_score_full() {
        let result = validate(json!({
            "socialNetworks": [
                { "platform": "instagram", "url": "https://instagram.com/luz", "isActive": true },
                { "platform": "facebook", "url": "https://facebook.com/luz" }
            ]
        }));
        assert_eq!(result.completion_percentage, 100);
        assert!(result.is_valid);
        assert_eq!(result.completed_fields, vec!["socialNetworks"]);
    }

    #[test]
    fn test_single_active_link_scores_half() {
        let result = validate(json!({
            "socialNetworks": [
                { "platform": "instagram", "url": "https://instagram.com/luz" },
                { "platform": "tiktok", "url": "https://tiktok.com/@luz", "isActive": false },
                { "platform": "facebook", "url": "" }
            ]
        }));
        assert_eq!(result.completion_percentage, 50);
    }

    #[test]
    fn test_no_links() {
        let result = validate(json!({}));
        assert_eq!(result.completion_percentage, 0);
        assert!(result.is_valid);
        assert!(result.completed_fields.is_empty());
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn test_malformed_urls_reported_independently_of_score() {
        let result = validate(json!({
            "socialNetworks": [
                { "platform": "instagram", "url": "instagram luz" },
                { "platform": "facebook", "url": "https://facebook.com/luz" },
                { "platform": "x", "url": "x.com/luz", "isActive": false }
            ]
        }));
        assert_eq!(result.completion_percentage, 100);
        assert_eq!(result.errors.len(), 2);
        assert!(!result.is_valid);
    }
}
