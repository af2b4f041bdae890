//! User entity resolved from the company directory.

/// A company member whose ledger data is included in consolidated reports.
///
/// Snapshot taken when the company's user list is resolved; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub company_id: i64,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>, company_id: i64) -> Self {
        Self {
            id,
            email: email.into(),
            company_id,
        }
    }
}
