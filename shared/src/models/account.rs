//! Account Model

use serde::{Deserialize, Serialize};

/// Account role tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Vendor,
    Employee,
    Admin,
}

impl Role {
    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "VENDOR" => Some(Self::Vendor),
            "EMPLOYEE" => Some(Self::Employee),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Vendor => "VENDOR",
            Self::Employee => "EMPLOYEE",
            Self::Admin => "ADMIN",
        }
    }

    /// Staff manage stall inventory and see all bookings
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Employee | Self::Admin)
    }
}

/// Account row (includes credential hash, never serialized to clients)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub business_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Account {
    /// Parsed role tag; unknown values fall back to Vendor (least privilege)
    pub fn role_tag(&self) -> Role {
        Role::from_db(&self.role).unwrap_or(Role::Vendor)
    }
}

/// Account response (without credential hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub business_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub created_at: i64,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            business_name: a.business_name,
            contact_name: a.contact_name,
            phone: a.phone,
            address: a.address,
            role: a.role,
            created_at: a.created_at,
        }
    }
}

/// Update account profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
