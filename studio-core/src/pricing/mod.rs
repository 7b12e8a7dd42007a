//! Pricing Module
//!
//! Prices are computed on read from stored cost inputs and the studio's
//! active pricing configuration. Nothing here persists a derived price,
//! except quotes, which freeze their values explicitly.

mod calculator;
mod catalog;
mod quote;
mod service;

pub use calculator::*;
pub use catalog::*;
pub use quote::*;
pub use service::*;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Pricing computation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("{field} must be a finite non-negative amount, got {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("{field} must be a percentage in [0, 100), got {value}")]
    PercentageOutOfRange { field: &'static str, value: f64 },

    #[error("comision_venta must be lower than 100, got {0}")]
    CommissionTooHigh(f64),

    #[error("{step} exceeds the representable amount")]
    Overflow { step: &'static str },
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match &err {
            PricingError::InvalidInput { field, value } => {
                AppError::with_message(ErrorCode::PricingInvalidInput, err.to_string())
                    .with_detail("field", *field)
                    .with_detail("value", *value)
            }
            PricingError::PercentageOutOfRange { field, value } => {
                AppError::with_message(ErrorCode::PricingConfigInvalid, err.to_string())
                    .with_detail("field", *field)
                    .with_detail("value", *value)
            }
            PricingError::CommissionTooHigh(value) => {
                AppError::with_message(ErrorCode::PricingCommissionTooHigh, err.to_string())
                    .with_detail("field", "comision_venta")
                    .with_detail("value", *value)
            }
            PricingError::Overflow { step } => {
                AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
                    .with_detail("step", *step)
            }
        }
    }
}
