//! API routes for feria-server, split into sub-modules by domain

mod auth;
mod employees;
mod health;
mod profile;
mod reservations;
mod stalls;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};

use crate::auth::{Identity, auth_middleware};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Inventory and booking oversight require EMPLOYEE or ADMIN.
pub fn require_staff(identity: &Identity) -> Result<(), AppError> {
    if !identity.role.is_staff() {
        return Err(AppError::new(ErrorCode::StaffRequired));
    }
    Ok(())
}

/// Employee administration requires ADMIN.
pub fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.role != shared::models::Role::Admin {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    Ok(())
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public: registration and login
    let public = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Everything else requires a valid bearer token; role gates live in the
    // handlers (staff for inventory writes and the full booking list, admin
    // for employee administration).
    let protected = Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/stalls", get(stalls::list_stalls).post(stalls::create_stall))
        .route(
            "/api/stalls/{id}",
            get(stalls::get_stall)
                .put(stalls::update_stall)
                .delete(stalls::delete_stall),
        )
        .route("/api/employees", post(employees::create_employee))
        .route(
            "/api/reservations",
            get(reservations::list_all).post(reservations::create_reservation),
        )
        .route("/api/reservations/mine", get(reservations::list_mine))
        .route(
            "/api/reservations/{id}",
            axum::routing::delete(reservations::cancel_reservation),
        )
        .route(
            "/api/reservations/{id}/genres",
            put(reservations::set_genres),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(protected)
        .with_state(state)
}
