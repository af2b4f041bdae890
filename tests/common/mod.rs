#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use consolidated_reports::application::services::{
    CompanyAggregator, FailurePolicy, NotificationDispatcher, ReportPersister, ReportPipeline,
    ReportRenderer, RetryPolicy, UserConsolidationFetcher,
};
use consolidated_reports::domain::entities::{
    NewReportRecord, OrderRecord, ReportRecord, ReportRequest, TransactionRecord, User,
};
use consolidated_reports::domain::repositories::{ReportRepository, UserRepository};
use consolidated_reports::error::AppError;
use consolidated_reports::infrastructure::ledger::{
    LedgerError, LedgerResult, OrderSource, TransactionSource,
};
use consolidated_reports::infrastructure::mail::{MailError, MailResult, Mailer, OutgoingMail};
use consolidated_reports::infrastructure::storage::FsReportStorage;
use consolidated_reports::state::AppState;

pub fn users(company_id: i64, names: &[&str]) -> Vec<User> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| User::new(id, format!("{name}@acme.test"), company_id))
        .collect()
}

pub fn report_request(company_id: i64) -> ReportRequest {
    let day = |d| {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    };
    ReportRequest {
        company_id,
        start_date: day(1),
        end_date: day(31),
        recipient: "cfo@acme.test".to_string(),
    }
}

/// Users of a single company, served from memory.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Vec<User>,
    pub calls: AtomicUsize,
}

impl InMemoryUsers {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_company(&self, company_id: i64) -> Result<Vec<User>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .iter()
            .filter(|u| u.company_id == company_id)
            .cloned()
            .collect())
    }
}

/// Ledger returning two orders and two transactions per user.
///
/// Each user can get its own latency, and listed users fail their
/// transaction fetch.
#[derive(Default)]
pub struct StubLedger {
    latency: HashMap<i64, Duration>,
    failing: HashSet<i64>,
    pub order_calls: AtomicUsize,
    pub transaction_calls: AtomicUsize,
}

impl StubLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, user_id: i64, latency: Duration) -> Self {
        self.latency.insert(user_id, latency);
        self
    }

    pub fn failing_for(mut self, user_id: i64) -> Self {
        self.failing.insert(user_id);
        self
    }

    async fn wait(&self, user_id: i64) {
        if let Some(latency) = self.latency.get(&user_id) {
            tokio::time::sleep(*latency).await;
        }
    }
}

#[async_trait]
impl OrderSource for StubLedger {
    async fn fetch_orders(&self, user_id: i64) -> LedgerResult<Vec<OrderRecord>> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(user_id).await;
        Ok(vec![
            OrderRecord::new(1, user_id, 100.0, "BTC"),
            OrderRecord::new(2, user_id, 50.0, "ETH"),
        ])
    }
}

#[async_trait]
impl TransactionSource for StubLedger {
    async fn fetch_transactions(&self, user_id: i64) -> LedgerResult<Vec<TransactionRecord>> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        self.wait(user_id).await;
        if self.failing.contains(&user_id) {
            return Err(LedgerError::Status {
                status: 502,
                body: "upstream down".to_string(),
            });
        }
        Ok(vec![
            TransactionRecord::new(1, user_id, 100.0, "deposit"),
            TransactionRecord::new(2, user_id, 200.0, "deposit"),
        ])
    }
}

/// Report metadata kept in memory, optionally rejecting every save.
#[derive(Default)]
pub struct InMemoryReports {
    records: Mutex<Vec<ReportRecord>>,
    fail_saves: bool,
    pub save_calls: AtomicUsize,
}

impl InMemoryReports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<ReportRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReports {
    async fn save(&self, new_record: NewReportRecord) -> Result<ReportRecord, AppError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(AppError::internal("Database error", json!({})));
        }
        let mut records = self.records.lock().unwrap();
        let record = ReportRecord::new(
            records.len() as i64 + 1,
            new_record.file_path,
            new_record.created_at,
        );
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ReportRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}

/// Mailer that records every message, optionally rejecting all of them or
/// never answering.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    reject: bool,
    hang: bool,
    pub attempts: AtomicUsize,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> MailResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.reject {
            return Err(MailError::Rejected {
                status: 503,
                body: "relay unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Every collaborator of the pipeline, observable after a run.
pub struct Harness {
    pub users: Arc<InMemoryUsers>,
    pub ledger: Arc<StubLedger>,
    pub storage: Arc<FsReportStorage>,
    pub reports: Arc<InMemoryReports>,
    pub mailer: Arc<RecordingMailer>,
    pub policy: FailurePolicy,
    pub stage_timeout: Option<Duration>,
    dir: TempDir,
}

impl Harness {
    pub async fn new(
        users: Vec<User>,
        ledger: StubLedger,
        reports: InMemoryReports,
        mailer: RecordingMailer,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsReportStorage::open(dir.path()).await.unwrap();

        Self {
            users: Arc::new(InMemoryUsers::new(users)),
            ledger: Arc::new(ledger),
            storage: Arc::new(storage),
            reports: Arc::new(reports),
            mailer: Arc::new(mailer),
            policy: FailurePolicy::FailFast,
            stage_timeout: None,
            dir,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_stage_timeout(mut self, stage_timeout: Duration) -> Self {
        self.stage_timeout = Some(stage_timeout);
        self
    }

    pub fn aggregator(&self) -> CompanyAggregator {
        let fetcher = Arc::new(UserConsolidationFetcher::new(
            self.ledger.clone(),
            self.ledger.clone(),
        ));
        CompanyAggregator::new(self.users.clone(), fetcher, self.policy)
    }

    pub fn pipeline(&self) -> Arc<ReportPipeline> {
        Arc::new(
            ReportPipeline::new(
                self.aggregator(),
                ReportRenderer::new(),
                ReportPersister::new(self.storage.clone(), self.reports.clone(), false),
                NotificationDispatcher::new(
                    self.storage.clone(),
                    self.mailer.clone(),
                    RetryPolicy::none(),
                ),
            )
            .with_stage_timeout(self.stage_timeout),
        )
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.pipeline(), self.reports.clone(), self.storage.clone())
    }

    /// Report files currently on disk.
    pub fn files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
            .collect()
    }
}

impl Harness {
    /// Deletes the report directory to simulate lost storage.
    pub fn remove_report_dir(&self) {
        std::fs::remove_dir_all(self.dir.path()).unwrap();
    }
}
