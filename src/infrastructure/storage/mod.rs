//! Durable storage for rendered reports.

mod fs_storage;
mod service;

pub use fs_storage::FsReportStorage;
pub use service::{ReportStorage, StorageError, StorageResult};

#[cfg(test)]
pub use service::MockReportStorage;
