//! Request to generate a consolidated report.

use chrono::NaiveDateTime;

/// What to report on and who receives the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub company_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Destination address of the finished report.
    pub recipient: String,
}
