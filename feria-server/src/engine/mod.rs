//! Reservation allocation engine
//!
//! Owns every transition of the reservation state machine:
//!
//! ```text
//!  (none) --reserve(new pair)--> ACTIVE
//!  CANCELLED --reserve(same pair)--> ACTIVE (row revived in place)
//!  ACTIVE --cancel--> CANCELLED
//!  CANCELLED --cancel--> CANCELLED (no-op)
//! ```
//!
//! Correctness rests on the guarded stall update inside
//! [`db::reservations::reserve`]: availability is re-derived there, never
//! trusted from the pre-check. QR issuance and email run after commit and are
//! best effort; a committed booking is never rolled back over them.

use shared::error::{AppError, ErrorCode};
use shared::models::{Reservation, ReservationDetailRow, VENDOR_RESERVATION_QUOTA};
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::gateway::{Mailer, QrGateway};

/// Book a stall for a vendor.
///
/// Fast-path checks (stall known and marked available, vendor under quota) run
/// outside the transaction. The quota count is advisory: two simultaneous
/// reserves by one vendor on different stalls can both pass it.
pub async fn reserve(
    pool: &SqlitePool,
    qr: &dyn QrGateway,
    mailer: &dyn Mailer,
    vendor_id: i64,
    stall_id: i64,
) -> ServiceResult<Reservation> {
    let stall = db::stalls::find_by_id(pool, stall_id)
        .await?
        .ok_or_else(AppError::stall_unavailable)?;
    if !stall.is_available {
        return Err(AppError::stall_unavailable().into());
    }

    let active = db::reservations::count_active_for_vendor(pool, vendor_id).await?;
    if active >= VENDOR_RESERVATION_QUOTA {
        return Err(AppError::quota_exceeded().into());
    }

    let now = shared::util::now_millis();
    let mut reservation = db::reservations::reserve(pool, vendor_id, stall_id, now)
        .await?
        .ok_or_else(AppError::stall_unavailable)?;

    // The booking is committed. Everything below decorates it.
    match qr.issue(reservation.id, vendor_id, &stall.name).await {
        Ok(url) => {
            let stamped = shared::util::now_millis();
            match db::reservations::set_qr_code_url(pool, reservation.id, &url, stamped).await {
                Ok(()) => reservation.qr_code_url = Some(url),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        reservation_id = reservation.id,
                        "Failed to persist QR reference"
                    );
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                reservation_id = reservation.id,
                "QR issuance failed, reservation stands without a code"
            );
        }
    }

    match db::accounts::find_by_id(pool, vendor_id).await {
        Ok(Some(vendor)) => {
            if let Err(e) = mailer
                .reservation_confirmed(
                    &vendor.email,
                    &vendor.business_name,
                    &stall.name,
                    reservation.qr_code_url.as_deref(),
                )
                .await
            {
                tracing::warn!(error = %e, to = %vendor.email, "Confirmation email failed");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Vendor lookup for notification failed"),
    }

    Ok(reservation)
}

/// Cancel a reservation, freeing its stall in the same transaction.
///
/// Only the owning vendor may cancel. Cancelling an already-CANCELLED
/// reservation is a silent success and leaves the stall untouched.
pub async fn cancel(
    pool: &SqlitePool,
    mailer: &dyn Mailer,
    reservation_id: i64,
    vendor_id: i64,
) -> ServiceResult<()> {
    let reservation = db::reservations::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(AppError::reservation_not_found)?;

    if reservation.vendor_id != vendor_id {
        return Err(AppError::new(ErrorCode::NotReservationOwner).into());
    }

    if !reservation.status_tag().is_active() {
        return Ok(());
    }

    let now = shared::util::now_millis();
    let freed = db::reservations::cancel(pool, reservation_id, reservation.stall_id, now).await?;
    if !freed {
        // A concurrent cancel settled first; same observable outcome.
        return Ok(());
    }

    let stall_name = match db::stalls::find_by_id(pool, reservation.stall_id).await {
        Ok(Some(stall)) => stall.name,
        _ => format!("#{}", reservation.stall_id),
    };
    match db::accounts::find_by_id(pool, vendor_id).await {
        Ok(Some(vendor)) => {
            if let Err(e) = mailer
                .reservation_cancelled(&vendor.email, &vendor.business_name, &stall_name)
                .await
            {
                tracing::warn!(error = %e, to = %vendor.email, "Cancellation email failed");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Vendor lookup for notification failed"),
    }

    Ok(())
}

/// Replace the genre tags. Guarded only by reservation existence; callers
/// enforce ownership.
pub async fn set_genres(
    pool: &SqlitePool,
    reservation_id: i64,
    genres: &[String],
) -> ServiceResult<Reservation> {
    let now = shared::util::now_millis();
    let updated = db::reservations::set_genres(pool, reservation_id, genres, now).await?;
    if !updated {
        return Err(AppError::reservation_not_found().into());
    }
    let reservation = db::reservations::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(AppError::reservation_not_found)?;
    Ok(reservation)
}

/// A vendor's reservations, newest first, with stall and vendor display fields.
pub async fn list_for_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> ServiceResult<Vec<ReservationDetailRow>> {
    Ok(db::reservations::list_for_vendor(pool, vendor_id).await?)
}

/// Every reservation on the books, newest first.
pub async fn list_all(pool: &SqlitePool) -> ServiceResult<Vec<ReservationDetailRow>> {
    Ok(db::reservations::list_all(pool).await?)
}
