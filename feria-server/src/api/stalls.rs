//! Stall inventory endpoints
//!
//! Reads are open to any authenticated account; writes are staff-only.
//! Availability is never edited here, only by the reservation engine.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Stall, StallCreate, StallUpdate};

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, require_staff};

#[derive(Deserialize)]
pub struct StallListQuery {
    pub available: Option<bool>,
}

/// GET /api/stalls
pub async fn list_stalls(
    State(state): State<AppState>,
    Query(query): Query<StallListQuery>,
) -> ApiResult<Vec<Stall>> {
    let stalls = db::stalls::list(&state.pool, query.available.unwrap_or(false))
        .await
        .map_err(|e| {
            tracing::error!("DB error listing stalls: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(stalls))
}

/// GET /api/stalls/{id}
pub async fn get_stall(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Stall> {
    let stall = db::stalls::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("DB error fetching stall: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::StallNotFound))?;
    Ok(Json(stall))
}

/// POST /api/stalls (staff)
pub async fn create_stall(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<StallCreate>,
) -> ApiResult<Stall> {
    require_staff(&identity)?;

    if req.name.trim().is_empty() {
        return Err(AppError::validation("Stall name is required"));
    }

    let duplicate = db::stalls::find_by_name(&state.pool, req.name.trim())
        .await
        .map_err(|e| {
            tracing::error!("DB error checking stall name: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if duplicate.is_some() {
        return Err(AppError::new(ErrorCode::StallNameExists));
    }

    let data = StallCreate {
        name: req.name.trim().to_string(),
        ..req
    };
    let now = shared::util::now_millis();
    let stall = db::stalls::create(&state.pool, &data, now)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create stall: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(stall_id = stall.id, name = %stall.name, "Stall created");
    Ok(Json(stall))
}

/// PUT /api/stalls/{id} (staff), attribute edits only
pub async fn update_stall(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<StallUpdate>,
) -> ApiResult<Stall> {
    require_staff(&identity)?;

    if let Some(name) = &req.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Stall name must not be empty"));
        }
        let duplicate = db::stalls::find_by_name(&state.pool, name.trim())
            .await
            .map_err(|e| {
                tracing::error!("DB error checking stall name: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;
        if let Some(found) = duplicate
            && found.id != id
        {
            return Err(AppError::new(ErrorCode::StallNameExists));
        }
    }

    let data = StallUpdate {
        name: req.name.as_deref().map(|n| n.trim().to_string()),
        ..req
    };
    let now = shared::util::now_millis();
    let stall = db::stalls::update(&state.pool, id, &data, now)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update stall: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::StallNotFound))?;

    Ok(Json(stall))
}

/// DELETE /api/stalls/{id} (staff), refused while an ACTIVE reservation exists
pub async fn delete_stall(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_staff(&identity)?;

    let active = db::reservations::count_active_for_stall(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("DB error checking stall reservations: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if active > 0 {
        return Err(AppError::new(ErrorCode::StallReserved));
    }

    let deleted = db::stalls::delete(&state.pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete stall: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    if !deleted {
        return Err(AppError::new(ErrorCode::StallNotFound));
    }

    tracing::info!(stall_id = id, "Stall deleted");
    Ok(Json(serde_json::json!({ "message": "Stall deleted" })))
}
