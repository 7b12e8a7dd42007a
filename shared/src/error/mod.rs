//! Unified error system for the studio platform
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Studio (tenant) errors
//! - 5xxx: Pricing errors
//! - 6xxx: Setup validation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::StudioNotFound);
//!
//! let err = AppError::with_message(ErrorCode::PricingConfigInvalid, "comision_venta must be < 100")
//!     .with_detail("field", "comision_venta");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(5001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
