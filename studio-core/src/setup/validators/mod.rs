//! Section validator implementations
//!
//! Each validator implements the `SectionValidator` trait and scores one
//! section of the studio snapshot. Validators are PURE functions.

use enum_dispatch::enum_dispatch;
use serde_json::Value;
use shared::models::{SectionId, ValidationResult};

use super::SetupError;

mod commercial_terms;
mod contact;
mod identity;
mod pricing;
mod services;
mod social;
mod unimplemented;

pub use commercial_terms::CommercialTermsValidator;
pub use contact::ContactValidator;
pub use identity::IdentityValidator;
pub use pricing::PricingValidator;
pub use services::ServicesValidator;
pub use social::SocialPresenceValidator;
pub use unimplemented::UnimplementedValidator;

/// Scores one section of a studio snapshot
///
/// Findings about the data go into `ValidationResult::errors`; `Err` is
/// reserved for the validator itself being unable to run.
#[enum_dispatch]
pub trait SectionValidator {
    fn section_id(&self) -> SectionId;

    fn validate(&self, snapshot: &Value) -> Result<ValidationResult, SetupError>;
}

/// ValidatorKind enum - dispatches to concrete validator implementations
#[enum_dispatch(SectionValidator)]
#[derive(Debug, Clone)]
pub enum ValidatorKind {
    Identity(IdentityValidator),
    Contact(ContactValidator),
    Social(SocialPresenceValidator),
    Pricing(PricingValidator),
    CommercialTerms(CommercialTermsValidator),
    Services(ServicesValidator),
    Unimplemented(UnimplementedValidator),
}

impl ValidatorKind {
    /// This is the ONLY place with a match on SectionId.
    ///
    /// Sections without a validator resolve to [`UnimplementedValidator`],
    /// which fails instead of scoring.
    pub fn for_section(section_id: &SectionId) -> Self {
        match section_id {
            SectionId::Identity => IdentityValidator.into(),
            SectionId::Contact => ContactValidator.into(),
            SectionId::Social => SocialPresenceValidator.into(),
            SectionId::Pricing => PricingValidator.into(),
            SectionId::CommercialTerms => CommercialTermsValidator.into(),
            SectionId::Services => ServicesValidator.into(),
            SectionId::Team | SectionId::Branding | SectionId::Other(_) => {
                UnimplementedValidator::new(section_id.clone()).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_for_section_resolves_matching_validator() {
        for id in [
            SectionId::Identity,
            SectionId::Contact,
            SectionId::Social,
            SectionId::Pricing,
            SectionId::CommercialTerms,
            SectionId::Services,
        ] {
            let validator = ValidatorKind::for_section(&id);
            assert_eq!(validator.section_id(), id);
            assert!(!matches!(validator, ValidatorKind::Unimplemented(_)));
        }
    }

    #[test]
    fn test_unknown_sections_fail_loudly() {
        for id in [
            SectionId::Team,
            SectionId::Branding,
            SectionId::Other("gallery".to_string()),
        ] {
            let validator = ValidatorKind::for_section(&id);
            assert_eq!(validator.section_id(), id);
            let err = validator.validate(&json!({})).unwrap_err();
            assert!(matches!(err, SetupError::ValidatorNotImplemented(ref s) if *s == id));
        }
    }
}
