//! Delivery of stored reports through the mail channel.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use crate::application::error::PipelineError;
use crate::domain::entities::{ReportRecord, ReportRequest};
use crate::infrastructure::mail::{Attachment, Mailer, OutgoingMail};
use crate::infrastructure::storage::ReportStorage;

const SUBJECT: &str = "Consolidated report";
const DEFAULT_ATTACHMENT_NAME: &str = "report.txt";
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry schedule for the notification send.
///
/// Delays double from twice `base_delay`, with full jitter, capped at one
/// minute. `max_retries = 0` sends exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    fn delays(&self) -> impl Iterator<Item = Duration> {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX).max(1);

        ExponentialBackoff::from_millis(2)
            .factor(base_ms)
            .max_delay(MAX_RETRY_DELAY)
            .map(jitter)
            .take(self.max_retries)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Sends a stored report file as a mail attachment.
pub struct NotificationDispatcher {
    storage: Arc<dyn ReportStorage>,
    mailer: Arc<dyn Mailer>,
    retry: RetryPolicy,
}

impl NotificationDispatcher {
    pub fn new(storage: Arc<dyn ReportStorage>, mailer: Arc<dyn Mailer>, retry: RetryPolicy) -> Self {
        Self {
            storage,
            mailer,
            retry,
        }
    }

    /// Reads the report file and mails it to the requester.
    ///
    /// A failure leaves the record untouched; the report stays stored but
    /// undelivered.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FileRead`] if the file cannot be read.
    /// Returns [`PipelineError::Notify`] once every send attempt has failed.
    pub async fn dispatch(
        &self,
        record: &ReportRecord,
        request: &ReportRequest,
    ) -> Result<(), PipelineError> {
        let bytes = self
            .storage
            .read(&record.file_path)
            .await
            .map_err(|source| PipelineError::FileRead {
                file_path: record.file_path.clone(),
                source,
            })?;

        let mail = OutgoingMail {
            to: request.recipient.clone(),
            subject: SUBJECT.to_string(),
            body: format!(
                "Attached is the consolidated report for company {} covering {} to {}.",
                request.company_id, request.start_date, request.end_date
            ),
            attachment: Attachment {
                file_name: attachment_name(&record.file_path),
                bytes,
            },
        };

        let mailer = &self.mailer;
        let mail = &mail;
        Retry::spawn(self.retry.delays(), move || async move {
            let result = mailer.send(mail).await;
            if let Err(e) = &result {
                warn!(to = %mail.to, error = %e, "Report notification attempt failed");
            }
            result
        })
        .await
        .map_err(PipelineError::Notify)?;

        info!(report_id = record.id, to = %request.recipient, "Report notification sent");
        Ok(())
    }
}

fn attachment_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_ATTACHMENT_NAME)
        .to_string()
}
