//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::StudioNotFound | Self::PricingConfigMissing => {
                StatusCode::NOT_FOUND
            }

            Self::ValueOutOfRange | Self::PricingInvalidInput => StatusCode::BAD_REQUEST,

            Self::PricingConfigInvalid | Self::PricingCommissionTooHigh => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            Self::StudioSnapshotInvalid
            | Self::SetupValidatorMissing
            | Self::SetupSectionFailed
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
