//! Numeric error codes shared by the booking server and its clients.
//!
//! Codes live in domain ranges so a client can classify an error without a
//! lookup table: 0xxx general, 1xxx auth, 2xxx permission, 3xxx account,
//! 4xxx stall, 5xxx reservation, 9xxx system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error code. Serializes as a bare u16 so TypeScript
/// clients can switch on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx general
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    // 1xxx auth
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    PasswordTooShort = 1005,

    // 2xxx permission
    PermissionDenied = 2001,
    StaffRequired = 2002,
    AdminRequired = 2003,
    NotReservationOwner = 2004,

    // 3xxx account
    AccountNotFound = 3001,
    AccountEmailExists = 3002,
    AccountDisabled = 3003,

    // 4xxx stall
    StallNotFound = 4001,
    /// Stall does not exist or is already taken. `reserve` reports both the
    /// missing-stall and the lost-race case under this one code.
    StallUnavailable = 4002,
    StallNameExists = 4003,
    /// Stall cannot be deleted while an ACTIVE reservation holds it.
    StallReserved = 4004,

    // 5xxx reservation
    ReservationNotFound = 5001,
    /// Vendor already holds the maximum number of ACTIVE reservations.
    QuotaExceeded = 5002,

    // 9xxx system
    InternalError = 9001,
    DatabaseError = 9002,
    NetworkError = 9003,
    /// Transient storage or gateway timeout. Safe to retry.
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    /// Every defined code, for table-driven conversion and tests.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::Success,
        ErrorCode::Unknown,
        ErrorCode::ValidationFailed,
        ErrorCode::NotFound,
        ErrorCode::AlreadyExists,
        ErrorCode::NotAuthenticated,
        ErrorCode::InvalidCredentials,
        ErrorCode::TokenExpired,
        ErrorCode::TokenInvalid,
        ErrorCode::PasswordTooShort,
        ErrorCode::PermissionDenied,
        ErrorCode::StaffRequired,
        ErrorCode::AdminRequired,
        ErrorCode::NotReservationOwner,
        ErrorCode::AccountNotFound,
        ErrorCode::AccountEmailExists,
        ErrorCode::AccountDisabled,
        ErrorCode::StallNotFound,
        ErrorCode::StallUnavailable,
        ErrorCode::StallNameExists,
        ErrorCode::StallReserved,
        ErrorCode::ReservationNotFound,
        ErrorCode::QuotaExceeded,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::NetworkError,
        ErrorCode::TimeoutError,
        ErrorCode::ConfigError,
    ];

    /// Numeric value of this code.
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message. Handlers may override it per call site.
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StaffRequired => "Staff role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotReservationOwner => "Reservation belongs to another vendor",

            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::AccountEmailExists => "Email is already registered",
            ErrorCode::AccountDisabled => "Account is disabled",

            ErrorCode::StallNotFound => "Stall not found",
            ErrorCode::StallUnavailable => "Stall is not available",
            ErrorCode::StallNameExists => "Stall name already exists",
            ErrorCode::StallReserved => "Stall has an active reservation",

            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::QuotaExceeded => "Active reservation limit reached",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out, please retry",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A u16 that does not name any defined [`ErrorCode`].
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
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_are_stable() {
        // Clients hardcode these; renumbering is a breaking change.
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::NotReservationOwner.code(), 2004);
        assert_eq!(ErrorCode::AccountEmailExists.code(), 3002);
        assert_eq!(ErrorCode::StallUnavailable.code(), 4002);
        assert_eq!(ErrorCode::QuotaExceeded.code(), 5002);
        assert_eq!(ErrorCode::TimeoutError.code(), 9004);
    }

    #[test]
    fn test_every_code_roundtrips_through_u16() {
        for code in ErrorCode::ALL.iter().copied() {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_undefined_values_are_rejected() {
        for value in [6u16, 999, 1006, 4005, 5003, 8000, 10000] {
            assert_eq!(ErrorCode::try_from(value), Err(InvalidErrorCode(value)));
        }
    }

    #[test]
    fn test_serde_uses_bare_numbers() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::StallUnavailable).unwrap(),
            "4002"
        );
        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::ReservationNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(ErrorCode::QuotaExceeded.to_string(), "5002");
        assert_eq!(InvalidErrorCode(999).to_string(), "invalid error code: 999");
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(
            ErrorCode::QuotaExceeded.message(),
            "Active reservation limit reached"
        );
        assert_eq!(
            ErrorCode::StallUnavailable.message(),
            "Stall is not available"
        );
        assert_eq!(
            ErrorCode::PasswordTooShort.message(),
            "Password must be at least 8 characters"
        );
    }
}
