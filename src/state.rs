//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::ReportPipeline;
use crate::domain::repositories::ReportRepository;
use crate::infrastructure::storage::ReportStorage;

/// Handles shared by every request.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReportPipeline>,
    pub reports: Arc<dyn ReportRepository>,
    pub storage: Arc<dyn ReportStorage>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<ReportPipeline>,
        reports: Arc<dyn ReportRepository>,
        storage: Arc<dyn ReportStorage>,
    ) -> Self {
        Self {
            pipeline,
            reports,
            storage,
        }
    }
}
