use chrono::{Duration, Utc};
use consolidated_reports::domain::entities::NewReportRecord;
use consolidated_reports::domain::repositories::ReportRepository;
use consolidated_reports::error::AppError;
use consolidated_reports::infrastructure::persistence::PgReportRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_record(file_path: &str, minutes_ago: i64) -> NewReportRecord {
    NewReportRecord {
        file_path: file_path.to_string(),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_assigns_id(pool: PgPool) {
    let repo = PgReportRepository::new(Arc::new(pool));

    let first = repo.save(new_record("reports/a.txt", 0)).await.unwrap();
    let second = repo.save(new_record("reports/b.txt", 0)).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.file_path, "reports/a.txt");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_file_path_conflicts(pool: PgPool) {
    let repo = PgReportRepository::new(Arc::new(pool));

    repo.save(new_record("reports/a.txt", 0)).await.unwrap();
    let result = repo.save(new_record("reports/a.txt", 0)).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_id(pool: PgPool) {
    let repo = PgReportRepository::new(Arc::new(pool));
    let saved = repo.save(new_record("reports/a.txt", 0)).await.unwrap();

    let found = repo.find_by_id(saved.id).await.unwrap();
    let missing = repo.find_by_id(saved.id + 1000).await.unwrap();

    assert_eq!(found.map(|r| r.file_path), Some("reports/a.txt".to_string()));
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_recent_newest_first(pool: PgPool) {
    let repo = PgReportRepository::new(Arc::new(pool));
    repo.save(new_record("reports/old.txt", 30)).await.unwrap();
    repo.save(new_record("reports/new.txt", 1)).await.unwrap();
    repo.save(new_record("reports/mid.txt", 10)).await.unwrap();

    let recent = repo.list_recent(2).await.unwrap();

    let paths: Vec<&str> = recent.iter().map(|r| r.file_path.as_str()).collect();
    assert_eq!(paths, vec!["reports/new.txt", "reports/mid.txt"]);
    assert_eq!(repo.count().await.unwrap(), 3);
}
