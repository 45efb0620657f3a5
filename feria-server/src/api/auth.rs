//! Authentication endpoints: vendor registration and login

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{AccountResponse, Role};

use crate::db;
use crate::state::AppState;
use crate::util::hash_password;

use super::ApiResult;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub business_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: AccountResponse,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    let business_name = req.business_name.trim();
    if business_name.is_empty() {
        return Err(AppError::validation("Business name is required"));
    }

    let existing = db::accounts::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error during registration: {e}");
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
        business_name,
        req.contact_name.as_deref(),
        req.phone.as_deref(),
        req.address.as_deref(),
        Role::Vendor.as_db(),
        now,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create account: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let account = db::accounts::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("DB error after registration: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;

    let token = crate::auth::create_token(account.id, &account.email, &account.role, &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(account_id = account.id, "Vendor registered");

    Ok(Json(AuthResponse {
        token,
        account: account.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();

    // Unknown email and wrong password produce the same error, so a caller
    // cannot probe which addresses are registered.
    let account = db::accounts::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error during login: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(AppError::invalid_credentials)?;

    if !crate::util::verify_password(&req.password, &account.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let token = crate::auth::create_token(account.id, &account.email, &account.role, &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(AuthResponse {
        token,
        account: account.into(),
    }))
}
