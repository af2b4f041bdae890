//! In-process ledger with fixed data, used when no ledger API is configured.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::service::{LedgerResult, OrderSource, TransactionSource};
use crate::domain::entities::{OrderRecord, TransactionRecord};

/// Ledger source returning the same four orders and four transactions for
/// every user after a fixed delay.
///
/// # Use Cases
///
/// - Development environments without a ledger backend
/// - Demonstrating that report generation runs out-of-band of the trigger request
pub struct SimulatedLedger {
    delay: Duration,
}

impl SimulatedLedger {
    pub fn new(delay: Duration) -> Self {
        debug!("Using SimulatedLedger (delay: {:?})", delay);
        Self { delay }
    }
}

#[async_trait]
impl OrderSource for SimulatedLedger {
    async fn fetch_orders(&self, user_id: i64) -> LedgerResult<Vec<OrderRecord>> {
        tokio::time::sleep(self.delay).await;

        Ok((1..=4)
            .map(|id| OrderRecord::new(id, user_id, 100.0, "BTC"))
            .collect())
    }
}

#[async_trait]
impl TransactionSource for SimulatedLedger {
    async fn fetch_transactions(&self, user_id: i64) -> LedgerResult<Vec<TransactionRecord>> {
        tokio::time::sleep(self.delay).await;

        Ok([100.0, 200.0, 300.0, 300.0]
            .into_iter()
            .zip(1..)
            .map(|(amount, id)| TransactionRecord::new(id, user_id, amount, "deposit"))
            .collect())
    }
}
