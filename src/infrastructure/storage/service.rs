//! Report storage trait and error type.

use async_trait::async_trait;
use std::io;

/// Errors that can occur while reading or writing report files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Report file not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable storage for rendered report bodies.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FsReportStorage`] - Local filesystem directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Writes `content` to a new, uniquely named file and returns its path.
    ///
    /// The path is only returned once the content is durable.
    async fn store(&self, content: &[u8]) -> StorageResult<String>;

    /// Reads a stored file fully into memory.
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Deletes a stored file.
    async fn remove(&self, path: &str) -> StorageResult<()>;

    /// Checks whether the storage backend is usable.
    async fn health_check(&self) -> bool;
}
