//! Failure types of the report pipeline.

use std::fmt;
use std::time::Duration;

use crate::domain::entities::ReportRecord;
use crate::error::AppError;
use crate::infrastructure::ledger::LedgerError;
use crate::infrastructure::mail::MailError;
use crate::infrastructure::storage::StorageError;

/// Pipeline stage that can fail or time out.
///
/// Rendering is a pure transformation and has no failure mode of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Aggregate,
    Persist,
    Dispatch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Aggregate => "aggregate",
            Stage::Persist => "persist",
            Stage::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by pipeline stages, one variant per failure domain.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to resolve users of company {company_id}: {source}")]
    UserLookup {
        company_id: i64,
        #[source]
        source: AppError,
    },

    #[error("failed to fetch ledger data for user {user_id}: {source}")]
    Fetch {
        user_id: i64,
        #[source]
        source: LedgerError,
    },

    #[error("consolidation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to write report file: {0}")]
    FileWrite(#[source] StorageError),

    #[error("report file {file_path} written but its record could not be saved: {source}")]
    RecordWrite {
        file_path: String,
        #[source]
        source: AppError,
    },

    #[error("report file {file_path} written but its record was not saved within {timeout:?}")]
    RecordTimeout { file_path: String, timeout: Duration },

    #[error("failed to read report file {file_path}: {source}")]
    FileRead {
        file_path: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to send report notification: {0}")]
    Notify(#[source] MailError),

    #[error("{stage} stage timed out after {timeout:?}")]
    Timeout { stage: Stage, timeout: Duration },
}

/// A stage error tagged with the stage it came from.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {error}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub error: PipelineError,
}

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Report stored and delivered.
    Delivered { record: ReportRecord },
    /// A stage before dispatch failed; nothing downstream ran.
    Aborted { stage: Stage, error: PipelineError },
    /// Report stored and recorded, but the notification never went out.
    Undelivered {
        record: ReportRecord,
        error: PipelineError,
    },
}

impl PipelineOutcome {
    /// Metric label of the outcome.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineOutcome::Delivered { .. } => "delivered",
            PipelineOutcome::Aborted { .. } => "aborted",
            PipelineOutcome::Undelivered { .. } => "undelivered",
        }
    }

    /// The saved report record, if the run got that far.
    pub fn record(&self) -> Option<&ReportRecord> {
        match self {
            PipelineOutcome::Delivered { record } | PipelineOutcome::Undelivered { record, .. } => {
                Some(record)
            }
            PipelineOutcome::Aborted { .. } => None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, PipelineOutcome::Delivered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_outcome_labels_and_record() {
        let record = ReportRecord::new(1, "r.txt".to_string(), Utc::now());

        let delivered = PipelineOutcome::Delivered {
            record: record.clone(),
        };
        let aborted = PipelineOutcome::Aborted {
            stage: Stage::Aggregate,
            error: PipelineError::Timeout {
                stage: Stage::Aggregate,
                timeout: Duration::from_secs(1),
            },
        };

        assert_eq!(delivered.label(), "delivered");
        assert_eq!(delivered.record(), Some(&record));
        assert!(delivered.is_delivered());
        assert_eq!(aborted.label(), "aborted");
        assert!(aborted.record().is_none());
    }

    #[test]
    fn test_timeout_message_names_stage() {
        let error = PipelineError::Timeout {
            stage: Stage::Dispatch,
            timeout: Duration::from_secs(5),
        };

        assert_eq!(error.to_string(), "dispatch stage timed out after 5s");
    }

    #[test]
    fn test_record_timeout_message_names_file() {
        let error = PipelineError::RecordTimeout {
            file_path: "reports/r.txt".to_string(),
            timeout: Duration::from_secs(5),
        };

        assert_eq!(
            error.to_string(),
            "report file reports/r.txt written but its record was not saved within 5s"
        );
    }
}
