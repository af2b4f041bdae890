//! Report pipeline stages and their orchestrator.

pub mod company_aggregator;
pub mod notification_dispatcher;
pub mod report_persister;
pub mod report_pipeline;
pub mod report_renderer;
pub mod user_consolidation;

pub use company_aggregator::{CompanyAggregator, FailurePolicy};
pub use notification_dispatcher::{NotificationDispatcher, RetryPolicy};
pub use report_persister::ReportPersister;
pub use report_pipeline::ReportPipeline;
pub use report_renderer::ReportRenderer;
pub use user_consolidation::UserConsolidationFetcher;
