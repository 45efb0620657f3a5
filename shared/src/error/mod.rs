//! Error codes, the [`AppError`] type, and the [`ApiResponse`] envelope.
//!
//! Codes are grouped into thousand-blocks (0xxx general, 1xxx auth, 2xxx
//! permission, 3xxx account, 4xxx stall, 5xxx reservation, 9xxx system),
//! and every code knows its own HTTP status and [`ErrorCategory`]. Handlers
//! build an [`AppError`], the axum integration turns it into a JSON
//! envelope with the matching status:
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::quota_exceeded();
//! assert_eq!(err.code, ErrorCode::QuotaExceeded);
//! assert_eq!(err.http_status().as_u16(), 409);
//!
//! let err = AppError::validation("Business name is required")
//!     .with_detail("field", "business_name");
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
