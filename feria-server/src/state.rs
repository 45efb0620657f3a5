//! Application state for feria-server

use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::gateway::{HttpQrGateway, Mailer, QrGateway, SesMailer};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Handles every request handler clones. The gateways sit behind trait
/// objects so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub qr: Arc<dyn QrGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt_secret: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_path).await?;
        let ses = ses_client().await;

        Ok(Self {
            pool,
            qr: Arc::new(HttpQrGateway::new(config.qr_service_url.clone())),
            mailer: Arc::new(SesMailer::new(ses, config.ses_from_email.clone())),
            jwt_secret: config.jwt_secret.clone(),
        })
    }
}

/// SES client from ambient AWS credentials. SES_REGION overrides the region
/// when mail must go through a different one than the rest of the account.
async fn ses_client() -> SesClient {
    let base = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    match std::env::var("SES_REGION") {
        Ok(region) => {
            let cfg = base
                .to_builder()
                .region(aws_config::Region::new(region))
                .build();
            SesClient::new(&cfg)
        }
        Err(_) => SesClient::new(&base),
    }
}
