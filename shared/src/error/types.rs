//! Application error type and the JSON envelope it renders to.

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error carried across layer boundaries: a machine-readable [`ErrorCode`],
/// a message suitable for end users, and optional structured detail entries
/// (offending field, resource id) for clients that want them.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message.
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    /// Error with a call-site message replacing the default.
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Appends one detail entry, creating the map on first use.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Status the HTTP layer will respond with.
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // Shorthand for the codes handlers raise most.

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Stall missing or already taken. Both cases surface as one 409 so a
    /// probing client cannot tell them apart.
    pub fn stall_unavailable() -> Self {
        Self::new(ErrorCode::StallUnavailable)
    }

    pub fn quota_exceeded() -> Self {
        Self::new(ErrorCode::QuotaExceeded)
    }

    pub fn reservation_not_found() -> Self {
        Self::new(ErrorCode::ReservationNotFound)
    }

    /// Retryable fault (busy storage, gateway timeout). Maps to 503.
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TimeoutError, msg)
    }
}

/// JSON envelope every endpoint responds with.
///
/// Success: `{"code": 0, "message": "OK", "data": ...}`.
/// Failure: `{"code": <nonzero>, "message": ..., "details": ...?}`.
/// Absent fields are omitted rather than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Success envelope wrapping `data`.
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload, for deletes and cancels.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Failure envelope carrying the error's code, message, and details.
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.code.category() == super::category::ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }
        let status = self.http_status();
        (status, axum::Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_the_code() {
        let err = AppError::new(ErrorCode::StallUnavailable);
        assert_eq!(err.code, ErrorCode::StallUnavailable);
        assert_eq!(err.message, "Stall is not available");
        assert!(err.details.is_none());

        let err = AppError::with_message(ErrorCode::ValidationFailed, "Email is malformed");
        assert_eq!(err.message, "Email is malformed");
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("Business name is required")
            .with_detail("field", "business_name")
            .with_detail("max_length", 120);

        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["field"], "business_name");
        assert_eq!(details["max_length"], 120);
    }

    #[test]
    fn test_display_is_the_message() {
        let err = AppError::with_message(ErrorCode::QuotaExceeded, "No more than 3 stalls");
        assert_eq!(err.to_string(), "No more than 3 stalls");
    }

    #[test]
    fn test_shorthand_constructors() {
        let cases = [
            (AppError::not_authenticated(), ErrorCode::NotAuthenticated, StatusCode::UNAUTHORIZED),
            (AppError::invalid_credentials(), ErrorCode::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::token_expired(), ErrorCode::TokenExpired, StatusCode::UNAUTHORIZED),
            (AppError::stall_unavailable(), ErrorCode::StallUnavailable, StatusCode::CONFLICT),
            (AppError::quota_exceeded(), ErrorCode::QuotaExceeded, StatusCode::CONFLICT),
            (AppError::reservation_not_found(), ErrorCode::ReservationNotFound, StatusCode::NOT_FOUND),
            (AppError::transient("storage busy"), ErrorCode::TimeoutError, StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code, code);
            assert_eq!(err.http_status(), status, "{code:?}");
        }
    }

    #[test]
    fn test_envelope_success_shape() {
        let json = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["data"], 7);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_envelope_ok_omits_data() {
        let json = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(json["code"], 0);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_envelope_error_shape() {
        let err = AppError::stall_unavailable().with_detail("stall_id", 42);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["code"], 4002);
        assert_eq!(json["message"], "Stall is not available");
        assert_eq!(json["details"]["stall_id"], 42);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_envelope_deserializes() {
        let envelope: ApiResponse<i64> =
            serde_json::from_str(r#"{"code":0,"message":"OK","data":42}"#).unwrap();
        assert_eq!(envelope.code, Some(0));
        assert_eq!(envelope.data, Some(42));
    }
}
