//! Order and transaction records produced by the external ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single order placed by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    /// Traded asset, e.g. `BTC`.
    pub asset: String,
}

impl OrderRecord {
    pub fn new(id: i64, user_id: i64, amount: f64, asset: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            amount,
            asset: asset.into(),
        }
    }
}

impl fmt::Display for OrderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order #{} user={} amount={:.2} asset={}",
            self.id, self.user_id, self.amount, self.asset
        )
    }
}

/// A single account movement of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    /// Movement type, e.g. `deposit` or `withdrawal`.
    pub kind: String,
}

impl TransactionRecord {
    pub fn new(id: i64, user_id: i64, amount: f64, kind: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            amount,
            kind: kind.into(),
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transaction #{} user={} amount={:.2} kind={}",
            self.id, self.user_id, self.amount, self.kind
        )
    }
}
