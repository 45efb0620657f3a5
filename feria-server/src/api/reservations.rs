//! Reservation endpoints, thin glue over the allocation engine

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Reservation, ReservationDetailRow};

use crate::auth::Identity;
use crate::state::AppState;
use crate::{db, engine};

use super::{ApiResult, require_staff};

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub stall_id: i64,
}

#[derive(Deserialize)]
pub struct SetGenresRequest {
    pub genres: Vec<String>,
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateReservationRequest>,
) -> ApiResult<Reservation> {
    let reservation = engine::reserve(
        &state.pool,
        state.qr.as_ref(),
        state.mailer.as_ref(),
        identity.account_id,
        req.stall_id,
    )
    .await
    .map_err(AppError::from)?;

    tracing::info!(
        reservation_id = reservation.id,
        vendor_id = identity.account_id,
        stall_id = req.stall_id,
        "Stall reserved"
    );
    Ok(Json(reservation))
}

/// DELETE /api/reservations/{id}
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    engine::cancel(&state.pool, state.mailer.as_ref(), id, identity.account_id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        reservation_id = id,
        vendor_id = identity.account_id,
        "Reservation cancelled"
    );
    Ok(Json(serde_json::json!({ "message": "Reservation cancelled" })))
}

/// PUT /api/reservations/{id}/genres
pub async fn set_genres(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<SetGenresRequest>,
) -> ApiResult<Reservation> {
    // Ownership is checked here; the engine itself only guards existence.
    let existing = db::reservations::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("DB error fetching reservation: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(AppError::reservation_not_found)?;
    if existing.vendor_id != identity.account_id {
        return Err(AppError::new(ErrorCode::NotReservationOwner));
    }

    let reservation = engine::set_genres(&state.pool, id, &req.genres)
        .await
        .map_err(AppError::from)?;
    Ok(Json(reservation))
}

/// GET /api/reservations/mine
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<ReservationDetailRow>> {
    let rows = engine::list_for_vendor(&state.pool, identity.account_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(rows))
}

/// GET /api/reservations (staff)
pub async fn list_all(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<ReservationDetailRow>> {
    require_staff(&identity)?;
    let rows = engine::list_all(&state.pool).await.map_err(AppError::from)?;
    Ok(Json(rows))
}
