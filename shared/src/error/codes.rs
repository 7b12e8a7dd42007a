//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Studio (tenant) errors
//! - 5xxx: Pricing errors
//! - 6xxx: Setup validation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Resource not found
    NotFound = 3,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Studio ====================
    /// Studio not found
    StudioNotFound = 3001,
    /// Studio snapshot could not be read
    StudioSnapshotInvalid = 3002,

    // ==================== 5xxx: Pricing ====================
    /// Pricing configuration is invalid
    PricingConfigInvalid = 5001,
    /// Sales commission makes the price undefined
    PricingCommissionTooHigh = 5002,
    /// Cost or overhead input is invalid
    PricingInvalidInput = 5003,
    /// Studio has no active pricing configuration
    PricingConfigMissing = 5004,

    // ==================== 6xxx: Setup ====================
    /// No validator exists for a section
    SetupValidatorMissing = 6001,
    /// A section validator failed
    SetupSectionFailed = 6002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Studio
            ErrorCode::StudioNotFound => "Studio not found",
            ErrorCode::StudioSnapshotInvalid => "Studio data could not be read",

            // Pricing
            ErrorCode::PricingConfigInvalid => "Pricing configuration is invalid",
            ErrorCode::PricingCommissionTooHigh => {
                "Sales commission must be lower than 100 percent"
            }
            ErrorCode::PricingInvalidInput => "Cost and overhead must be non-negative numbers",
            ErrorCode::PricingConfigMissing => "Studio has no active pricing configuration",

            // Setup
            ErrorCode::SetupValidatorMissing => "No validator is available for this section",
            ErrorCode::SetupSectionFailed => "Section validation failed",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            3 => Ok(ErrorCode::NotFound),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Studio
            3001 => Ok(ErrorCode::StudioNotFound),
            3002 => Ok(ErrorCode::StudioSnapshotInvalid),

            // Pricing
            5001 => Ok(ErrorCode::PricingConfigInvalid),
            5002 => Ok(ErrorCode::PricingCommissionTooHigh),
            5003 => Ok(ErrorCode::PricingInvalidInput),
            5004 => Ok(ErrorCode::PricingConfigMissing),

            // Setup
            6001 => Ok(ErrorCode::SetupValidatorMissing),
            6002 => Ok(ErrorCode::SetupSectionFailed),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::StudioNotFound.code(), 3001);
        assert_eq!(ErrorCode::PricingConfigInvalid.code(), 5001);
        assert_eq!(ErrorCode::PricingCommissionTooHigh.code(), 5002);
        assert_eq!(ErrorCode::SetupValidatorMissing.code(), 6001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::PricingCommissionTooHigh).unwrap();
        assert_eq!(json, "5002");

        let code: ErrorCode = serde_json::from_str("6002").unwrap();
        assert_eq!(code, ErrorCode::SetupSectionFailed);

        assert!(serde_json::from_str::<ErrorCode>("7777").is_err());
    }

    #[test]
    fn test_every_code_roundtrips_through_u16() {
        let all = [
            ErrorCode::Success,
            ErrorCode::NotFound,
            ErrorCode::ValueOutOfRange,
            ErrorCode::StudioNotFound,
            ErrorCode::StudioSnapshotInvalid,
            ErrorCode::PricingConfigInvalid,
            ErrorCode::PricingCommissionTooHigh,
            ErrorCode::PricingInvalidInput,
            ErrorCode::PricingConfigMissing,
            ErrorCode::SetupValidatorMissing,
            ErrorCode::SetupSectionFailed,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
