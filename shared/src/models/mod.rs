//! Data models
//!
//! Shared between the booking server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod account;
pub mod reservation;
pub mod stall;

// Re-exports
pub use account::*;
pub use reservation::*;
pub use stall::*;
