//! Account database operations

use shared::models::{Account, AccountUpdate};
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    hashed_password: &str,
    business_name: &str,
    contact_name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
    role: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO accounts (
            email, hashed_password, business_name, contact_name, phone, address,
            role, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(hashed_password)
    .bind(business_name)
    .bind(contact_name)
    .bind(phone)
    .bind(address)
    .bind(role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    data: &AccountUpdate,
    now: i64,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE accounts SET
            business_name = COALESCE(?, business_name),
            contact_name = COALESCE(?, contact_name),
            phone = COALESCE(?, phone),
            address = COALESCE(?, address),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.business_name)
    .bind(&data.contact_name)
    .bind(&data.phone)
    .bind(&data.address)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}
