//! Fire-and-forget orchestration of the report stages.
//!
//! ```text
//! trigger ─► aggregate ─► render ─► persist ─► dispatch ─► terminal log
//!               │                     │           │
//!               └──── aborted ◄───────┘           └──► stored, undelivered
//! ```

use futures::TryFutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};

use crate::application::error::{PipelineError, PipelineOutcome, Stage, StageFailure};
use crate::application::services::{
    CompanyAggregator, NotificationDispatcher, ReportPersister, ReportRenderer,
};
use crate::domain::entities::ReportRequest;

/// Runs the report stages as one background task per request.
///
/// Each stage consumes the previous stage's output by value. The first
/// failing stage ends the run; everything after it is skipped. Failures are
/// logged and counted here and never reach the caller of [`Self::trigger`].
pub struct ReportPipeline {
    aggregator: CompanyAggregator,
    renderer: ReportRenderer,
    persister: ReportPersister,
    dispatcher: NotificationDispatcher,
    stage_timeout: Option<Duration>,
    permits: Arc<Semaphore>,
}

impl ReportPipeline {
    pub fn new(
        aggregator: CompanyAggregator,
        renderer: ReportRenderer,
        persister: ReportPersister,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            aggregator,
            renderer,
            persister,
            dispatcher,
            stage_timeout: None,
            permits: Arc::new(Semaphore::new(Semaphore::MAX_PERMITS)),
        }
    }

    /// Bounds the aggregate, persist and dispatch stages. `None` waits forever.
    ///
    /// The persister applies the deadline to its file and record writes
    /// itself, so a late record write still goes through orphan handling.
    pub fn with_stage_timeout(mut self, stage_timeout: Option<Duration>) -> Self {
        self.stage_timeout = stage_timeout;
        self.persister = self.persister.with_step_timeout(stage_timeout);
        self
    }

    /// Limits how many runs execute at once. Extra runs queue inside their task.
    pub fn with_max_concurrent_runs(mut self, max_runs: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max_runs.max(1)));
        self
    }

    /// Schedules a run and returns without waiting for any stage.
    ///
    /// The handle resolves to the terminal outcome; callers that only need
    /// the acknowledgement drop it.
    pub fn trigger(self: &Arc<Self>, request: ReportRequest) -> JoinHandle<PipelineOutcome> {
        let pipeline = Arc::clone(self);
        let run_id = format!("{:016x}", rand::random::<u64>());
        let span = info_span!(
            "report_pipeline",
            run_id = %run_id,
            company_id = request.company_id
        );

        tokio::spawn(async move { pipeline.execute(request).await }.instrument(span))
    }

    async fn execute(&self, request: ReportRequest) -> PipelineOutcome {
        // The semaphore is never closed, so acquiring only waits.
        let _permit = self.permits.acquire().await.ok();
        let started = Instant::now();
        info!(recipient = %request.recipient, "Report pipeline started");

        let outcome = self.run(&request).await;

        metrics::counter!("report_pipeline_runs_total", "outcome" => outcome.label()).increment(1);
        metrics::histogram!("report_pipeline_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        log_outcome(&outcome);

        outcome
    }

    async fn run(&self, request: &ReportRequest) -> PipelineOutcome {
        let stored = self
            .within(Stage::Aggregate, self.aggregator.aggregate(request.company_id))
            .map_ok(|input| self.renderer.render(&input))
            .and_then(|content| {
                self.persister
                    .persist(content)
                    .map_err(|error| StageFailure {
                        stage: Stage::Persist,
                        error,
                    })
            })
            .await;

        let record = match stored {
            Ok(record) => record,
            Err(StageFailure { stage, error }) => return PipelineOutcome::Aborted { stage, error },
        };

        match self
            .within(Stage::Dispatch, self.dispatcher.dispatch(&record, request))
            .await
        {
            Ok(()) => PipelineOutcome::Delivered { record },
            Err(failure) => PipelineOutcome::Undelivered {
                record,
                error: failure.error,
            },
        }
    }

    async fn within<T>(
        &self,
        stage: Stage,
        work: impl Future<Output = Result<T, PipelineError>>,
    ) -> Result<T, StageFailure> {
        let result = match self.stage_timeout {
            Some(timeout) => tokio::time::timeout(timeout, work)
                .await
                .unwrap_or(Err(PipelineError::Timeout { stage, timeout })),
            None => work.await,
        };

        result.map_err(|error| StageFailure { stage, error })
    }
}

fn log_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::Delivered { record } => {
            info!(report_id = record.id, file_path = %record.file_path, "Report delivered");
        }
        PipelineOutcome::Aborted { stage, error } => {
            error!(stage = %stage, error = %error, "Report pipeline aborted");
        }
        PipelineOutcome::Undelivered { record, error } => {
            error!(
                report_id = record.id,
                file_path = %record.file_path,
                error = %error,
                "Report stored but not delivered"
            );
        }
    }
}
