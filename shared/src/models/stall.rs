//! Stall Model

use serde::{Deserialize, Serialize};

/// Stall size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StallSize {
    Small,
    Medium,
    Large,
}

impl StallSize {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "SMALL" => Some(Self::Small),
            "MEDIUM" => Some(Self::Medium),
            "LARGE" => Some(Self::Large),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
        }
    }
}

/// Stall entity: a bookable exhibition unit with a map position.
///
/// `is_available` is owned by the allocation engine (reserve/cancel);
/// attribute edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Stall {
    pub id: i64,
    pub name: String,
    pub size: String,
    pub dimensions: Option<String>,
    pub location: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create stall payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StallCreate {
    pub name: String,
    pub size: StallSize,
    pub dimensions: Option<String>,
    pub location: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

/// Update stall payload (attribute edits only; availability is engine-owned)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StallUpdate {
    pub name: Option<String>,
    pub size: Option<StallSize>,
    pub dimensions: Option<String>,
    pub location: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_db_roundtrip() {
        for size in [StallSize::Small, StallSize::Medium, StallSize::Large] {
            assert_eq!(StallSize::from_db(size.as_db()), Some(size));
        }
        assert_eq!(StallSize::from_db("HUGE"), None);
        assert_eq!(StallSize::from_db("small"), None);
    }

    #[test]
    fn test_size_serde() {
        assert_eq!(
            serde_json::to_string(&StallSize::Medium).unwrap(),
            "\"MEDIUM\""
        );
        let size: StallSize = serde_json::from_str("\"LARGE\"").unwrap();
        assert_eq!(size, StallSize::Large);
    }
}
