//! Account profile endpoints

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{AccountResponse, AccountUpdate};

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<AccountResponse> {
    let account = db::accounts::find_by_id(&state.pool, identity.account_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error fetching profile: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    Ok(Json(account.into()))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<AccountUpdate>,
) -> ApiResult<AccountResponse> {
    if let Some(name) = &req.business_name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("Business name must not be empty"));
    }

    let now = shared::util::now_millis();
    let account = db::accounts::update_profile(&state.pool, identity.account_id, &req, now)
        .await
        .map_err(|e| {
            tracing::error!("DB error updating profile: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::AccountNotFound))?;

    Ok(Json(account.into()))
}
