//! Per-user ledger data sources.
//!
//! Provides [`OrderSource`] and [`TransactionSource`] with two implementations:
//! - [`HttpLedgerClient`] - Production REST client
//! - [`SimulatedLedger`] - Fixed data for local runs

mod http_ledger;
mod service;
mod simulated_ledger;

pub use http_ledger::HttpLedgerClient;
pub use service::{LedgerError, LedgerResult, OrderSource, TransactionSource};
pub use simulated_ledger::SimulatedLedger;

#[cfg(test)]
pub use service::{MockOrderSource, MockTransactionSource};
