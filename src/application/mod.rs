//! Application layer: the consolidated report pipeline.
//!
//! Stages consume collaborator traits from the domain and infrastructure
//! layers and hand immutable values to each other.
//!
//! # Stages
//!
//! - [`services::UserConsolidationFetcher`] - Orders and transactions of one user
//! - [`services::CompanyAggregator`] - Parallel consolidation of every company user
//! - [`services::ReportRenderer`] - Deterministic text rendering
//! - [`services::ReportPersister`] - Report file plus metadata record
//! - [`services::NotificationDispatcher`] - Mail delivery of the stored file
//! - [`services::ReportPipeline`] - Background orchestration and terminal error handling

pub mod error;
pub mod services;

pub use error::{PipelineError, PipelineOutcome, Stage, StageFailure};
