//! Employee administration endpoints

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{AccountResponse, Role};

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;
use crate::util::hash_password;

use super::{ApiResult, require_admin};

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

/// POST /api/employees (admin)
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<AccountResponse> {
    require_admin(&identity)?;

    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Employee name is required"));
    }

    let existing = db::accounts::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error checking employee email: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if existing.is_some() {
        return Err(AppError::new(ErrorCode::AccountEmailExists));
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let now = shared::util::now_millis();
    let id = db::accounts::create(
        &state.pool,
        &email,
        &hashed,
        name,
        None,
        req.phone.as_deref(),
        None,
        Role::Employee.as_db(),
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create employee: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let account = db::accounts::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("DB error after employee creation: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;

    tracing::info!(account_id = account.id, "Employee account created");
    Ok(Json(account.into()))
}
