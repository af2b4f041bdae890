//! Filesystem-backed report storage.

use async_trait::async_trait;
use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::service::{ReportStorage, StorageError, StorageResult};

/// Stores each report as `report_<timestamp>_<random>.txt` inside one directory.
///
/// Content goes to a hidden temporary file first, is synced to disk and then
/// renamed into place, so a returned path never points at a partial file.
pub struct FsReportStorage {
    dir: PathBuf,
}

impl FsReportStorage {
    /// Opens the storage directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(dir.display().to_string(), e))?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unique_name() -> String {
        format!(
            "report_{}_{:08x}.txt",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            rand::random::<u32>()
        )
    }
}

#[async_trait]
impl ReportStorage for FsReportStorage {
    async fn store(&self, content: &[u8]) -> StorageResult<String> {
        let name = Self::unique_name();
        let tmp_path = self.dir.join(format!(".{name}.tmp"));
        let final_path = self.dir.join(&name);
        let tmp_display = tmp_path.display().to_string();

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .await
            .map_err(|e| StorageError::io(&tmp_display, e))?;

        write_synced(file, &tmp_path, content)
            .await
            .map_err(|e| StorageError::io(&tmp_display, e))?;

        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::io(final_path.display().to_string(), e));
        }

        let path = final_path.display().to_string();
        debug!(file_path = %path, bytes = content.len(), "Report file written");
        Ok(path)
    }

    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        fs::read(path).await.map_err(|e| StorageError::io(path, e))
    }

    async fn remove(&self, path: &str) -> StorageResult<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| StorageError::io(path, e))
    }

    async fn health_check(&self) -> bool {
        fs::metadata(&self.dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

/// Writes and syncs `content` through `file`, removing `path` if either fails.
async fn write_synced(mut file: fs::File, path: &Path, content: &[u8]) -> io::Result<()> {
    let written = async {
        file.write_all(content).await?;
        file.flush().await?;
        file.sync_all().await
    }
    .await;
    drop(file);

    if written.is_err() {
        let _ = fs::remove_file(path).await;
    }
    written
}
