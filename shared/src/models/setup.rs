//! Studio Setup Models
//!
//! Data contracts of the setup-completeness framework: validator output,
//! the static section catalog, and the persisted status graph.

use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Section identity ====================

/// Identifier of one configurable area of studio setup
///
/// Unknown ids are kept verbatim so an externalized catalog can name
/// sections this build has no validator for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionId {
    Identity,
    Contact,
    Social,
    Pricing,
    CommercialTerms,
    Services,
    Team,
    Branding,
    Other(String),
}

impl SectionId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Identity => "identity",
            Self::Contact => "contact",
            Self::Social => "social",
            Self::Pricing => "pricing",
            Self::CommercialTerms => "commercial_terms",
            Self::Services => "services",
            Self::Team => "team",
            Self::Branding => "branding",
            Self::Other(id) => id,
        }
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        match s {
            "identity" => Self::Identity,
            "contact" => Self::Contact,
            "social" => Self::Social,
            "pricing" => Self::Pricing,
            "commercial_terms" => Self::CommercialTerms,
            "services" => Self::Services,
            "team" => Self::Team,
            "branding" => Self::Branding,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Validator output ====================

/// Output of one section validator
///
/// `completed_fields` and `missing_fields` behave as sets: pushing a field
/// that is already listed is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// 0–100
    pub completion_percentage: u8,
    pub completed_fields: Vec<String>,
    pub missing_fields: Vec<String>,
    /// Human-readable violations, in discovery order
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn mark_completed(&mut self, field: impl Into<String>) {
        let field = field.into();
        if !self.completed_fields.contains(&field) {
            self.completed_fields.push(field);
        }
    }

    pub fn mark_missing(&mut self, field: impl Into<String>) {
        let field = field.into();
        if !self.missing_fields.contains(&field) {
            self.missing_fields.push(field);
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ==================== Section catalog ====================

/// Static catalog entry describing one section of studio setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSectionConfig {
    pub section_id: SectionId,
    pub name: String,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    /// Informational only, never enforced as a gate
    pub dependencies: Vec<SectionId>,
    /// Positive relative weight in the overall score
    pub weight: u32,
    pub is_active: bool,
}

// ==================== Status graph ====================

/// Derived status of one section, recomputed on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Pending,
    InProgress,
    Completed,
    Error,
}

impl SectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Parse the stored column value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted progress of one section (one row per studio and section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSectionProgress {
    pub section_id: SectionId,
    pub status: SectionStatus,
    pub completion_percentage: i32,
    pub completed_fields: Vec<String>,
    pub missing_fields: Vec<String>,
    pub errors: Vec<String>,
    /// Set only when this run observed the section as completed
    pub completed_at: Option<i64>,
    pub last_updated_at: i64,
}

/// Persisted setup status of one studio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StudioSetupStatus {
    pub id: i64,
    pub studio_id: i64,
    /// 0–100
    pub overall_progress: i32,
    pub is_fully_configured: bool,
    pub last_validated_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub sections: Vec<SetupSectionProgress>,
}

impl StudioSetupStatus {
    pub fn section(&self, id: &SectionId) -> Option<&SetupSectionProgress> {
        self.sections.iter().find(|s| &s.section_id == id)
    }
}
