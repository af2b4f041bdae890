//! Two-phase persistence of rendered reports.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::application::error::{PipelineError, Stage};
use crate::domain::consolidation::ReportContent;
use crate::domain::entities::{NewReportRecord, ReportRecord};
use crate::domain::repositories::ReportRepository;
use crate::infrastructure::storage::ReportStorage;

/// Writes the report file, then records it in the metadata store.
///
/// The two writes are not transactional. A failed record write leaves the
/// file behind as an orphan unless `cleanup_orphans` is enabled, in which
/// case the file is deleted before the error is returned. A record write
/// that runs past the step timeout counts as failed and is handled the same way.
pub struct ReportPersister {
    storage: Arc<dyn ReportStorage>,
    reports: Arc<dyn ReportRepository>,
    cleanup_orphans: bool,
    step_timeout: Option<Duration>,
}

impl ReportPersister {
    pub fn new(
        storage: Arc<dyn ReportStorage>,
        reports: Arc<dyn ReportRepository>,
        cleanup_orphans: bool,
    ) -> Self {
        Self {
            storage,
            reports,
            cleanup_orphans,
            step_timeout: None,
        }
    }

    /// Bounds the file write and the record write, each on its own.
    pub fn with_step_timeout(mut self, step_timeout: Option<Duration>) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    /// Stores the content and returns the saved record.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FileWrite`] if the file cannot be written; the
    /// metadata store is not touched.
    /// Returns [`PipelineError::Timeout`] if the file write does not finish in time.
    /// Returns [`PipelineError::RecordWrite`] if the record cannot be saved.
    /// Returns [`PipelineError::RecordTimeout`] if the record write does not
    /// finish in time.
    pub async fn persist(&self, content: ReportContent) -> Result<ReportRecord, PipelineError> {
        let file_path = bounded(self.step_timeout, self.storage.store(content.as_bytes()))
            .await
            .map_err(|timeout| PipelineError::Timeout {
                stage: Stage::Persist,
                timeout,
            })?
            .map_err(PipelineError::FileWrite)?;

        info!(file_path = %file_path, bytes = content.len(), "Report saved to file");

        let saved = bounded(
            self.step_timeout,
            self.reports.save(NewReportRecord::now(file_path.clone())),
        )
        .await;

        let error = match saved {
            Ok(Ok(record)) => {
                info!(report_id = record.id, file_path = %record.file_path, "Report record stored");
                return Ok(record);
            }
            Ok(Err(source)) => PipelineError::RecordWrite {
                file_path: file_path.clone(),
                source,
            },
            Err(timeout) => PipelineError::RecordTimeout {
                file_path: file_path.clone(),
                timeout,
            },
        };

        self.handle_orphan(&file_path).await;
        Err(error)
    }

    async fn handle_orphan(&self, file_path: &str) {
        if !self.cleanup_orphans {
            metrics::counter!("report_orphan_files_total").increment(1);
            warn!(file_path = %file_path, "Report file left without a record");
            return;
        }

        match self.storage.remove(file_path).await {
            Ok(()) => info!(file_path = %file_path, "Removed report file without a record"),
            Err(e) => {
                metrics::counter!("report_orphan_files_total").increment(1);
                error!(file_path = %file_path, error = %e, "Failed to remove orphan report file");
            }
        }
    }
}

async fn bounded<T>(limit: Option<Duration>, work: impl Future<Output = T>) -> Result<T, Duration> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| limit),
        None => Ok(work.await),
    }
}
