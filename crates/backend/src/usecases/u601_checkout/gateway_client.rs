use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::config::PaymentConfig;

pub const SANDBOX_BASE_URL: &str = "https://app.sandbox.midtrans.com";
pub const PRODUCTION_BASE_URL: &str = "https://app.midtrans.com";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Http(String),
    #[error("gateway rejected the transaction ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected gateway response: {0}")]
    Decode(String),
}

/// Тело запроса `POST /snap/v1/transactions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapTransaction {
    pub transaction_details: TransactionDetails,
    pub item_details: Vec<ItemDetails>,
    pub customer_details: CustomerDetails,
    pub credit_card: CreditCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetails {
    pub id: String,
    pub price: i64,
    pub quantity: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDetails {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditCard {
    pub secure: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapToken {
    pub token: String,
    pub redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SnapErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(&self, transaction: &SnapTransaction) -> Result<SnapToken, GatewayError>;
}

/// HTTP-клиент Snap API (hosted payment page)
pub struct SnapClient {
    client: reqwest::Client,
    base_url: String,
    server_key: String,
}

pub fn base_url(is_production: bool) -> &'static str {
    if is_production {
        PRODUCTION_BASE_URL
    } else {
        SANDBOX_BASE_URL
    }
}

/// `Basic base64("{server_key}:")`
pub fn authorization_header(server_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", server_key)))
}

impl SnapClient {
    pub fn new(config: &PaymentConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url(config.is_production).to_string(),
            server_key: config.server_key.clone(),
        })
    }

    fn transactions_url(&self) -> String {
        format!("{}/snap/v1/transactions", self.base_url)
    }
}

#[async_trait]
impl PaymentGateway for SnapClient {
    async fn create_transaction(&self, transaction: &SnapTransaction) -> Result<SnapToken, GatewayError> {
        let url = self.transactions_url();
        tracing::info!(
            "Snap: creating transaction {} ({} IDR) at {}",
            transaction.transaction_details.order_id,
            transaction.transaction_details.gross_amount,
            url
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", authorization_header(&self.server_key))
            .header("Accept", "application/json")
            .json(transaction)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<SnapErrorBody>(&body)
                .ok()
                .filter(|b| !b.error_messages.is_empty())
                .map(|b| b.error_messages.join("; "))
                .unwrap_or(body);
            tracing::error!("Snap request failed with status {}: {}", status, message);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<SnapToken>(&body).map_err(|e| {
            tracing::error!("Failed to parse Snap response: {}. Body: {}", e, body);
            GatewayError::Decode(e.to_string())
        })
    }
}
