//! Types shared between feria-server and its clients: the error system,
//! the domain models, and small helpers. Database-facing derives are behind
//! the `db` feature so thin clients stay off sqlx.

pub mod error;
pub mod models;
pub mod util;

pub use http;
pub use serde::{Deserialize, Serialize};
