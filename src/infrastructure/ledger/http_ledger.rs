//! HTTP client for the remote ledger API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::service::{LedgerError, LedgerResult, OrderSource, TransactionSource};
use crate::domain::entities::{OrderRecord, TransactionRecord};

const USER_AGENT: &str = concat!("consolidated-reports/", env!("CARGO_PKG_VERSION"));

/// Ledger source backed by a REST API.
///
/// # Endpoints
///
/// - `GET {base}/users/{id}/orders` - JSON array of [`OrderRecord`]
/// - `GET {base}/users/{id}/transactions` - JSON array of [`TransactionRecord`]
pub struct HttpLedgerClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLedgerClient {
    /// Builds a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Request`] if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> LedgerResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, user_id: i64, resource: &str) -> String {
        format!("{}/users/{}/{}", self.base_url, user_id, resource)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> LedgerResult<T> {
        debug!(url = %url, "Querying ledger API");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LedgerError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl OrderSource for HttpLedgerClient {
    async fn fetch_orders(&self, user_id: i64) -> LedgerResult<Vec<OrderRecord>> {
        self.get_json(&self.endpoint(user_id, "orders")).await
    }
}

#[async_trait]
impl TransactionSource for HttpLedgerClient {
    async fn fetch_transactions(&self, user_id: i64) -> LedgerResult<Vec<TransactionRecord>> {
        self.get_json(&self.endpoint(user_id, "transactions")).await
    }
}
