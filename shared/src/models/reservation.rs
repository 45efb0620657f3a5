//! Reservation Model

use serde::{Deserialize, Serialize};

/// Maximum simultaneously ACTIVE reservations per vendor
pub const VENDOR_RESERVATION_QUOTA: i64 = 3;

/// Reservation lifecycle status
///
/// COMPLETED is reserved for future settlement semantics; no current code
/// path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Active,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Does this reservation currently hold its stall?
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Reservation entity: binds one vendor to one stall.
///
/// At most one reservation row per (vendor, stall) pair is kept in live use:
/// re-reserving a cancelled pair resurrects the existing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub vendor_id: i64,
    pub stall_id: i64,
    pub status: String,
    pub qr_code_url: Option<String>,
    /// JSON array of free-text genre tags (e.g. ["poetry", "sci-fi"])
    #[cfg_attr(feature = "db", sqlx(json))]
    pub literary_genres: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    /// Parsed status; unknown values are treated as Cancelled (cannot hold a stall)
    pub fn status_tag(&self) -> ReservationStatus {
        ReservationStatus::from_db(&self.status).unwrap_or(ReservationStatus::Cancelled)
    }
}

/// Reservation list row for display, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationDetailRow {
    pub id: i64,
    pub vendor_id: i64,
    pub stall_id: i64,
    pub status: String,
    pub qr_code_url: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub literary_genres: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    // joined
    pub stall_name: String,
    pub stall_size: String,
    pub stall_location: Option<String>,
    pub business_name: String,
    pub vendor_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            ReservationStatus::Active,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ] {
            assert_eq!(ReservationStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(ReservationStatus::from_db("PENDING"), None);
        assert_eq!(ReservationStatus::from_db("active"), None);
    }

    #[test]
    fn test_status_is_active() {
        assert!(ReservationStatus::Active.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
        assert!(!ReservationStatus::Completed.is_active());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        let status: ReservationStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_quota_constant() {
        assert_eq!(VENDOR_RESERVATION_QUOTA, 3);
    }
}
