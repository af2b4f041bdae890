//! Ledger source traits and error type.

use async_trait::async_trait;

use crate::domain::entities::{OrderRecord, TransactionRecord};

/// Errors returned by ledger sources.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Ledger request failed: {0}")]
    Request(String),

    #[error("Ledger responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid ledger response: {0}")]
    Decode(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Source of a user's orders.
///
/// # Implementations
///
/// - [`crate::infrastructure::ledger::HttpLedgerClient`] - Remote ledger API
/// - [`crate::infrastructure::ledger::SimulatedLedger`] - Fixed data with artificial latency
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetches every order of a user.
    async fn fetch_orders(&self, user_id: i64) -> LedgerResult<Vec<OrderRecord>>;
}

/// Source of a user's transactions.
///
/// Kept separate from [`OrderSource`] so the two fetches can be served by
/// different backends and issued independently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetches every transaction of a user.
    async fn fetch_transactions(&self, user_id: i64) -> LedgerResult<Vec<TransactionRecord>>;
}
