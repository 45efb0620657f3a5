//! QR issuance via REST API (no SDK dependency)

use async_trait::async_trait;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Issues the entry QR for a confirmed reservation.
#[async_trait]
pub trait QrGateway: Send + Sync {
    async fn issue(
        &self,
        reservation_id: i64,
        vendor_id: i64,
        stall_name: &str,
    ) -> Result<String, BoxError>;
}

/// Client for the QR issuance service.
pub struct HttpQrGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQrGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl QrGateway for HttpQrGateway {
    async fn issue(
        &self,
        reservation_id: i64,
        vendor_id: i64,
        stall_name: &str,
    ) -> Result<String, BoxError> {
        let resp: serde_json::Value = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "reservation_id": reservation_id,
                "vendor_id": vendor_id,
                "stall_name": stall_name,
            }))
            .send()
            .await?
            .json()
            .await?;

        resp["url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| format!("QR issuance failed: {resp}").into())
    }
}
