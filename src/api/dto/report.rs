//! DTOs for report endpoints.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{ReportRecord, ReportRequest};

/// Default number of records returned by `GET /reports`.
pub const DEFAULT_LIST_LIMIT: i64 = 20;
/// Upper bound for the `limit` query parameter.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Request body of `POST /reports/consolidated`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_period", skip_on_field_errors = false))]
pub struct TriggerReportRequest {
    pub company_id: i64,

    /// Reporting period, local date-times such as `2024-01-01T00:00:00`.
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,

    /// Recipient of the finished report.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

fn validate_period(request: &TriggerReportRequest) -> Result<(), ValidationError> {
    if request.start_date > request.end_date {
        let mut error = ValidationError::new("period");
        error.message = Some("start_date must not be after end_date".into());
        return Err(error);
    }
    Ok(())
}

impl From<TriggerReportRequest> for ReportRequest {
    fn from(request: TriggerReportRequest) -> Self {
        Self {
            company_id: request.company_id,
            start_date: request.start_date,
            end_date: request.end_date,
            recipient: request.email,
        }
    }
}

/// Acknowledgement returned by endpoints that only accept work.
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

/// Query parameters of `GET /reports/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub file: String,
}

/// Query parameters of `GET /reports`.
#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub limit: Option<i64>,
}

impl ListReportsQuery {
    /// Returns the requested limit, or the default when absent.
    ///
    /// # Errors
    ///
    /// Returns a message if the limit is outside `1..=MAX_LIST_LIMIT`.
    pub fn validated_limit(&self) -> Result<i64, String> {
        let limit = self.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_LIST_LIMIT}"));
        }
        Ok(limit)
    }
}

/// One stored report.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub id: i64,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRecord> for ReportResponse {
    fn from(record: ReportRecord) -> Self {
        Self {
            id: record.id,
            file_path: record.file_path,
            created_at: record.created_at,
        }
    }
}

/// Response of `GET /reports`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub total: i64,
    pub items: Vec<ReportResponse>,
}
