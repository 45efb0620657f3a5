//! Coarse error classification derived from the code ranges.

use super::codes::ErrorCode;

/// One category per thousand-block of [`ErrorCode`] values. The HTTP layer
/// uses [`ErrorCategory::System`] to decide which failures get logged as
/// server faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Account,
    Stall,
    Reservation,
    System,
}

impl ErrorCategory {
    /// Classifies a raw code by its thousand-block. Unassigned blocks
    /// (6xxx..8xxx) fall through to `System`.
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => ErrorCategory::General,
            1 => ErrorCategory::Auth,
            2 => ErrorCategory::Permission,
            3 => ErrorCategory::Account,
            4 => ErrorCategory::Stall,
            5 => ErrorCategory::Reservation,
            _ => ErrorCategory::System,
        }
    }
}

impl ErrorCode {
    /// Category of this code.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_range_maps_to_its_category() {
        let cases = [
            (ErrorCode::ValidationFailed, ErrorCategory::General),
            (ErrorCode::InvalidCredentials, ErrorCategory::Auth),
            (ErrorCode::NotReservationOwner, ErrorCategory::Permission),
            (ErrorCode::AccountDisabled, ErrorCategory::Account),
            (ErrorCode::StallUnavailable, ErrorCategory::Stall),
            (ErrorCode::QuotaExceeded, ErrorCategory::Reservation),
            (ErrorCode::DatabaseError, ErrorCategory::System),
        ];
        for (code, category) in cases {
            assert_eq!(code.category(), category, "{code:?}");
        }
    }

    #[test]
    fn test_block_boundaries() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1000), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(5999), ErrorCategory::Reservation);
        // Reserved blocks count as system faults.
        assert_eq!(ErrorCategory::from_code(7500), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }
}
