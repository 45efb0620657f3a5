//! Liveness probe

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /health. Also pings the database so a wedged SQLite file shows up
/// here before vendors hit it.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database_ok = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let status = if database_ok { "ok" } else { "degraded" };

    Json(serde_json::json!({
        "status": status,
        "service": "feria-server",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database_ok,
    }))
}
