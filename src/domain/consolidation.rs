//! Values flowing between the report pipeline stages.
//!
//! Each value is built once by the stage that produces it and handed by value
//! to the next stage. None of them expose mutation after construction.

use crate::domain::entities::{OrderRecord, TransactionRecord, User};

/// A user together with the complete ledger data fetched for them.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConsolidated {
    user: User,
    orders: Vec<OrderRecord>,
    transactions: Vec<TransactionRecord>,
}

impl UserConsolidated {
    pub fn new(user: User, orders: Vec<OrderRecord>, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            user,
            orders,
            transactions,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }
}

/// One positional slot of an aggregated report.
///
/// `Unavailable` only appears when aggregation runs with the skip-failed
/// policy; under fail-fast every slot is `Consolidated`.
#[derive(Debug, Clone, PartialEq)]
pub enum UserSection {
    Consolidated(UserConsolidated),
    Unavailable { user: User, reason: String },
}

impl UserSection {
    pub fn user(&self) -> &User {
        match self {
            UserSection::Consolidated(data) => data.user(),
            UserSection::Unavailable { user, .. } => user,
        }
    }

    pub fn is_consolidated(&self) -> bool {
        matches!(self, UserSection::Consolidated(_))
    }
}

/// Consolidated data of every company user, in user-resolution order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedReportInput {
    company_id: i64,
    sections: Vec<UserSection>,
}

impl AggregatedReportInput {
    pub fn new(company_id: i64, sections: Vec<UserSection>) -> Self {
        Self {
            company_id,
            sections,
        }
    }

    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    pub fn sections(&self) -> &[UserSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of users whose data could not be fetched.
    pub fn unavailable_count(&self) -> usize {
        self.sections.iter().filter(|s| !s.is_consolidated()).count()
    }
}

/// Rendered report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContent(String);

impl ReportContent {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
