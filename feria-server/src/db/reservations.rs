//! Reservation database operations
//!
//! The two multi-statement transactions (reserve, cancel) live here so the
//! stall flip and the reservation row change always commit together.

use shared::models::{Reservation, ReservationDetailRow};
use sqlx::SqlitePool;
use sqlx::types::Json;

const DETAIL_SELECT: &str = r#"
    SELECT r.id, r.vendor_id, r.stall_id, r.status, r.qr_code_url,
           r.literary_genres, r.created_at, r.updated_at,
           s.name AS stall_name, s.size AS stall_size, s.location AS stall_location,
           a.business_name, a.email AS vendor_email
    FROM reservations r
    JOIN stalls s ON s.id = r.stall_id
    JOIN accounts a ON a.id = r.vendor_id
"#;

// ── Booking transactions ──

/// Atomically claim the stall and write the ACTIVE reservation row.
///
/// The `is_available = 1` predicate on the stall update is the double-booking
/// guard: under concurrent attempts exactly one update reports a changed row.
/// Returns `Ok(None)` when the guard loses (transaction rolls back untouched).
///
/// A CANCELLED row for the same (vendor, stall) pair is revived in place,
/// keeping its id, created_at, and genre history. Its stale QR reference is
/// cleared; a fresh one is issued after commit.
pub async fn reserve(
    pool: &SqlitePool,
    vendor_id: i64,
    stall_id: i64,
    now: i64,
) -> Result<Option<Reservation>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        "UPDATE stalls SET is_available = 0, updated_at = ? WHERE id = ? AND is_available = 1",
    )
    .bind(now)
    .bind(stall_id)
    .execute(&mut *tx)
    .await?;
    if claimed.rows_affected() == 0 {
        return Ok(None);
    }

    let cancelled: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT id FROM reservations
        WHERE vendor_id = ? AND stall_id = ? AND status = 'CANCELLED'
        ORDER BY id DESC LIMIT 1
        "#,
    )
    .bind(vendor_id)
    .bind(stall_id)
    .fetch_optional(&mut *tx)
    .await?;

    let id = match cancelled {
        Some((id,)) => {
            sqlx::query(
                r#"
                UPDATE reservations
                SET status = 'ACTIVE', qr_code_url = NULL, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
            id
        }
        None => {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO reservations (vendor_id, stall_id, status, created_at, updated_at)
                VALUES (?, ?, 'ACTIVE', ?, ?)
                RETURNING id
                "#,
            )
            .bind(vendor_id)
            .bind(stall_id)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    let reservation: Reservation = sqlx::query_as("SELECT * FROM reservations WHERE id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(reservation))
}

/// Atomically mark the reservation CANCELLED and free its stall.
///
/// The `status = 'ACTIVE'` predicate makes concurrent cancels of the same row
/// settle to one winner. Returns `Ok(false)` when the row was not ACTIVE
/// anymore (stall untouched).
pub async fn cancel(
    pool: &SqlitePool,
    reservation_id: i64,
    stall_id: i64,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let flipped = sqlx::query(
        "UPDATE reservations SET status = 'CANCELLED', updated_at = ? WHERE id = ? AND status = 'ACTIVE'",
    )
    .bind(now)
    .bind(reservation_id)
    .execute(&mut *tx)
    .await?;
    if flipped.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("UPDATE stalls SET is_available = 1, updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(stall_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

// ── Queries ──

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Reservation>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reservations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_active_for_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations WHERE vendor_id = ? AND status = 'ACTIVE'",
    )
    .bind(vendor_id)
    .fetch_one(pool)
    .await
}

pub async fn count_active_for_stall(pool: &SqlitePool, stall_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE stall_id = ? AND status = 'ACTIVE'")
        .bind(stall_id)
        .fetch_one(pool)
        .await
}

/// Record the issued QR url. Runs outside the booking transaction: the
/// reservation stands even if this update or the issuance itself fails.
pub async fn set_qr_code_url(
    pool: &SqlitePool,
    id: i64,
    url: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE reservations SET qr_code_url = ?, updated_at = ? WHERE id = ?")
        .bind(url)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_genres(
    pool: &SqlitePool,
    id: i64,
    genres: &[String],
    now: i64,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE reservations SET literary_genres = ?, updated_at = ? WHERE id = ?")
        .bind(Json(genres))
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn list_for_vendor(
    pool: &SqlitePool,
    vendor_id: i64,
) -> Result<Vec<ReservationDetailRow>, sqlx::Error> {
    let sql = format!("{DETAIL_SELECT} WHERE r.vendor_id = ? ORDER BY r.created_at DESC, r.id DESC");
    sqlx::query_as(&sql).bind(vendor_id).fetch_all(pool).await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ReservationDetailRow>, sqlx::Error> {
    let sql = format!("{DETAIL_SELECT} ORDER BY r.created_at DESC, r.id DESC");
    sqlx::query_as(&sql).fetch_all(pool).await
}
