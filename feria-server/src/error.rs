//! Unified service-layer error type for feria-server
//!
//! `ServiceError` bridges the gap between storage-layer errors (`sqlx::Error`)
//! and the API-layer error (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

/// Service-layer error.
///
/// - `Db`: storage errors (auto-logged; transient ones map to TimeoutError,
///   the rest to DatabaseError)
/// - `App`: business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Storage error (sqlx)
    Db(sqlx::Error),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

/// SQLITE_BUSY/SQLITE_LOCKED (primary codes 5 and 6, extended 261 and 517)
/// and pool exhaustion are retryable: the writer lock is held by a peer
/// transaction that will release it.
fn is_transient(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some("5" | "6" | "261" | "517"))
                || db.message().contains("database is locked")
        }
        _ => false,
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) if is_transient(&db_err) => {
                tracing::warn!(error = %db_err, "Transient storage contention");
                AppError::transient("Storage is busy, please retry")
            }
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::App(AppError::stall_unavailable()).into();
        assert_eq!(err.code, ErrorCode::StallUnavailable);
    }

    #[test]
    fn test_pool_timeout_is_transient() {
        let err: AppError = ServiceError::Db(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.code, ErrorCode::TimeoutError);
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_db_error_is_internal() {
        let err: AppError = ServiceError::Db(sqlx::Error::RowNotFound).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
