//! Allocation engine under contention
//!
//! Many vendors race for the same stall over one pool. The guarded
//! availability flip must pick exactly one winner, and repeated
//! reserve/cancel churn must settle back to a clean state.

use async_trait::async_trait;
use feria_server::gateway::{Mailer, QrGateway};
use feria_server::{db, engine};
use shared::error::{AppError, ErrorCode};
use shared::models::{Stall, StallCreate, StallSize};
use sqlx::SqlitePool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

struct FakeQr;

#[async_trait]
impl QrGateway for FakeQr {
    async fn issue(
        &self,
        reservation_id: i64,
        _vendor_id: i64,
        _stall_name: &str,
    ) -> Result<String, BoxError> {
        Ok(format!("https://qr.test/r/{reservation_id}"))
    }
}

/// Mailer that drops everything.
struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn reservation_confirmed(
        &self,
        _to: &str,
        _business_name: &str,
        _stall_name: &str,
        _qr_code_url: Option<&str>,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    async fn reservation_cancelled(
        &self,
        _to: &str,
        _business_name: &str,
        _stall_name: &str,
    ) -> Result<(), BoxError> {
        Ok(())
    }
}

async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("feria-stress.db");
    let pool = db::connect(path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open test database");
    (dir, pool)
}

async fn seed_vendor(pool: &SqlitePool, email: &str) -> i64 {
    db::accounts::create(
        pool,
        email,
        "not-a-real-hash",
        "Editorial Andina",
        None,
        None,
        None,
        "VENDOR",
        shared::util::now_millis(),
    )
    .await
    .expect("seed vendor")
}

async fn seed_stall(pool: &SqlitePool, name: &str) -> Stall {
    let data = StallCreate {
        name: name.to_string(),
        size: StallSize::Medium,
        dimensions: None,
        location: None,
        position_x: None,
        position_y: None,
    };
    db::stalls::create(pool, &data, shared::util::now_millis())
        .await
        .expect("seed stall")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contended_stall_has_single_winner() {
    const VENDORS: usize = 8;

    let (_dir, pool) = test_pool().await;
    let stall = seed_stall(&pool, "A1").await;

    let mut vendor_ids = Vec::with_capacity(VENDORS);
    for i in 0..VENDORS {
        vendor_ids.push(seed_vendor(&pool, &format!("vendor{i}@feria.test")).await);
    }

    // Everyone fires at once
    let mut handles = Vec::with_capacity(VENDORS);
    for vendor_id in vendor_ids {
        let pool = pool.clone();
        let stall_id = stall.id;
        handles.push(tokio::spawn(async move {
            engine::reserve(&pool, &FakeQr, &NullMailer, vendor_id, stall_id).await
        }));
    }

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.expect("reserve task panicked") {
            Ok(reservation) => {
                winners += 1;
                assert_eq!(reservation.stall_id, stall.id);
                assert_eq!(reservation.status, "ACTIVE");
            }
            Err(e) => {
                losers += 1;
                assert_eq!(AppError::from(e).code, ErrorCode::StallUnavailable);
            }
        }
    }

    assert_eq!(winners, 1, "exactly one reserve may claim the stall");
    assert_eq!(losers, VENDORS - 1);

    let stall_after = db::stalls::find_by_id(&pool, stall.id).await.unwrap().unwrap();
    assert!(!stall_after.is_available);

    let active = db::reservations::count_active_for_stall(&pool, stall.id)
        .await
        .unwrap();
    assert_eq!(active, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reserve_cancel_churn_settles_clean() {
    const VENDORS: usize = 4;
    const ATTEMPTS: usize = 25;

    let (_dir, pool) = test_pool().await;
    let stall = seed_stall(&pool, "A1").await;

    let mut vendor_ids = Vec::with_capacity(VENDORS);
    for i in 0..VENDORS {
        vendor_ids.push(seed_vendor(&pool, &format!("vendor{i}@feria.test")).await);
    }

    // Each vendor hammers the same stall: grab it when free, release it,
    // repeat. Losing an attempt is the expected outcome under contention.
    let mut handles = Vec::with_capacity(VENDORS);
    for vendor_id in vendor_ids {
        let pool = pool.clone();
        let stall_id = stall.id;
        handles.push(tokio::spawn(async move {
            let mut wins = 0usize;
            for _ in 0..ATTEMPTS {
                match engine::reserve(&pool, &FakeQr, &NullMailer, vendor_id, stall_id).await {
                    Ok(reservation) => {
                        engine::cancel(&pool, &NullMailer, reservation.id, vendor_id)
                            .await
                            .expect("cancel own reservation");
                        wins += 1;
                    }
                    Err(e) => {
                        assert_eq!(AppError::from(e).code, ErrorCode::StallUnavailable);
                    }
                }
            }
            wins
        }));
    }

    let mut total_wins = 0usize;
    for handle in handles {
        total_wins += handle.await.expect("churn task panicked");
    }
    assert!(total_wins >= 1, "somebody must have held the stall");

    // Every win was cancelled, so the dust settles clean
    let stall_after = db::stalls::find_by_id(&pool, stall.id).await.unwrap().unwrap();
    assert!(stall_after.is_available);

    let active = db::reservations::count_active_for_stall(&pool, stall.id)
        .await
        .unwrap();
    assert_eq!(active, 0);

    // Revival keeps one row per (vendor, stall) pair no matter how often
    // the pair rebooks
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE stall_id = ?")
        .bind(stall.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(rows <= VENDORS as i64);

    let cancelled: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reservations WHERE stall_id = ? AND status = 'CANCELLED'",
    )
    .bind(stall.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, cancelled);
}
