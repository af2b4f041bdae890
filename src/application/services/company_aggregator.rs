//! Company-wide fan-out of per-user consolidation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::application::error::PipelineError;
use crate::application::services::UserConsolidationFetcher;
use crate::domain::consolidation::{AggregatedReportInput, UserSection};
use crate::domain::repositories::UserRepository;

/// What to do when one user's data cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole aggregation on the first failed user.
    #[default]
    FailFast,
    /// Keep going and mark the failed user as unavailable in the report.
    SkipFailed,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_fast" => Ok(Self::FailFast),
            "skip_failed" => Ok(Self::SkipFailed),
            other => Err(format!(
                "unknown failure policy '{other}', expected 'fail_fast' or 'skip_failed'"
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => f.write_str("fail_fast"),
            Self::SkipFailed => f.write_str("skip_failed"),
        }
    }
}

/// Resolves a company's users and consolidates all of them in parallel.
pub struct CompanyAggregator {
    users: Arc<dyn UserRepository>,
    fetcher: Arc<UserConsolidationFetcher>,
    policy: FailurePolicy,
}

impl CompanyAggregator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        fetcher: Arc<UserConsolidationFetcher>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            users,
            fetcher,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Builds the aggregated input of a company report.
    ///
    /// Every user gets its own task, all spawned before any is awaited. Each
    /// task reports back with the position of its user, and the result is
    /// assembled from a slot array in user-resolution order, whatever order
    /// the tasks finish in.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UserLookup`] if the user list cannot be resolved.
    /// Under [`FailurePolicy::FailFast`], returns the first per-user error; the
    /// remaining tasks are aborted and completed results discarded.
    /// Returns [`PipelineError::Task`] if a consolidation task panics.
    pub async fn aggregate(&self, company_id: i64) -> Result<AggregatedReportInput, PipelineError> {
        let users = self
            .users
            .find_by_company(company_id)
            .await
            .map_err(|source| PipelineError::UserLookup { company_id, source })?;

        info!(company_id, users = users.len(), "Resolved company users");

        let mut tasks = JoinSet::new();
        for (slot, user) in users.iter().cloned().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            tasks.spawn(async move { (slot, fetcher.consolidate(user).await) });
        }

        let mut slots: Vec<Option<UserSection>> = vec![None; users.len()];

        // Dropping `tasks` on an early return aborts the fetches still running.
        while let Some(joined) = tasks.join_next().await {
            let (slot, result) = joined?;

            let section = match result {
                Ok(consolidated) => UserSection::Consolidated(consolidated),
                Err(err) => match self.policy {
                    FailurePolicy::FailFast => return Err(err),
                    FailurePolicy::SkipFailed => {
                        warn!(
                            company_id,
                            user_id = users[slot].id,
                            error = %err,
                            "Skipping user whose data could not be fetched"
                        );
                        UserSection::Unavailable {
                            user: users[slot].clone(),
                            reason: err.to_string(),
                        }
                    }
                },
            };

            slots[slot] = Some(section);
        }

        let sections: Vec<UserSection> = slots.into_iter().flatten().collect();
        debug_assert_eq!(sections.len(), users.len());

        Ok(AggregatedReportInput::new(company_id, sections))
    }
}
