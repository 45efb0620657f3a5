//! Stall database operations
//!
//! Attribute CRUD only. `is_available` flips happen inside the reservation
//! transactions in [`super::reservations`].

use shared::models::{Stall, StallCreate, StallUpdate};
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool, only_available: bool) -> Result<Vec<Stall>, sqlx::Error> {
    if only_available {
        sqlx::query_as("SELECT * FROM stalls WHERE is_available = 1 ORDER BY name")
            .fetch_all(pool)
            .await
    } else {
        sqlx::query_as("SELECT * FROM stalls ORDER BY name")
            .fetch_all(pool)
            .await
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Stall>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stalls WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Stall>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM stalls WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    data: &StallCreate,
    now: i64,
) -> Result<Stall, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO stalls (
            name, size, dimensions, location, position_x, position_y,
            is_available, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(data.size.as_db())
    .bind(&data.dimensions)
    .bind(&data.location)
    .bind(data.position_x.unwrap_or(0.0))
    .bind(data.position_y.unwrap_or(0.0))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    sqlx::query_as("SELECT * FROM stalls WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &StallUpdate,
    now: i64,
) -> Result<Option<Stall>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE stalls SET
            name = COALESCE(?, name),
            size = COALESCE(?, size),
            dimensions = COALESCE(?, dimensions),
            location = COALESCE(?, location),
            position_x = COALESCE(?, position_x),
            position_y = COALESCE(?, position_y),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(data.size.map(|s| s.as_db()))
    .bind(&data.dimensions)
    .bind(&data.location)
    .bind(data.position_x)
    .bind(data.position_y)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM stalls WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
