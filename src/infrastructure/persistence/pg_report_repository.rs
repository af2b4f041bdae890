//! PostgreSQL implementation of the report metadata store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewReportRecord, ReportRecord};
use crate::domain::repositories::ReportRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ReportRow {
    id: i64,
    file_path: String,
    created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportRecord {
    fn from(row: ReportRow) -> Self {
        ReportRecord::new(row.id, row.file_path, row.created_at)
    }
}

/// PostgreSQL repository for report records.
pub struct PgReportRepository {
    pool: Arc<PgPool>,
}

impl PgReportRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn save(&self, new_record: NewReportRecord) -> Result<ReportRecord, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            INSERT INTO reports (file_path, created_at)
            VALUES ($1, $2)
            RETURNING id, file_path, created_at
            "#,
        )
        .bind(&new_record.file_path)
        .bind(new_record.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportRecord>, AppError> {
        let row = sqlx::query_as::<_, ReportRow>(
            "SELECT id, file_path, created_at FROM reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ReportRecord::from))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<ReportRecord>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, file_path, created_at
            FROM reports
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ReportRecord::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
