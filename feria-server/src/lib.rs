//! feria-server: book fair stall booking service
//!
//! Module structure:
//!
//! ```text
//! feria-server/src/
//! ├── config     # environment configuration
//! ├── state      # shared application state (pool + gateways)
//! ├── error      # service-layer error bridging
//! ├── db/        # SQLite pool, migrations, per-table queries
//! ├── engine/    # reservation allocation engine (the booking core)
//! ├── gateway/   # QR issuance and email notification clients
//! ├── auth/      # JWT creation and middleware
//! ├── api/       # HTTP routes and handlers
//! └── util       # password hashing
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
