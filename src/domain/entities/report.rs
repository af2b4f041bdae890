//! Report metadata entity.

use chrono::{DateTime, Utc};

/// Metadata record of a report file that has been written to storage.
///
/// Only ever built after the file write succeeded, so `file_path` always
/// referred to an existing file at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub id: i64,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

impl ReportRecord {
    pub fn new(id: i64, file_path: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            file_path,
            created_at,
        }
    }
}

/// Input data for saving a report record. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReportRecord {
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

impl NewReportRecord {
    /// Stamps a freshly written file with the current time.
    pub fn now(file_path: String) -> Self {
        Self {
            file_path,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_record_now() {
        let before = Utc::now();
        let record = NewReportRecord::now("reports/report_1.txt".to_string());

        assert_eq!(record.file_path, "reports/report_1.txt");
        assert!(record.created_at >= before);
    }
}
