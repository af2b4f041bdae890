use consolidated_reports::domain::repositories::UserRepository;
use consolidated_reports::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

async fn create_company(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO companies (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn create_user(pool: &PgPool, email: &str, company_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, company_id) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(company_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_company_in_id_order(pool: PgPool) {
    let acme = create_company(&pool, "Acme").await;
    let other = create_company(&pool, "Other").await;

    let ana = create_user(&pool, "ana@acme.test", acme).await;
    create_user(&pool, "zed@other.test", other).await;
    let bob = create_user(&pool, "bob@acme.test", acme).await;

    let repo = PgUserRepository::new(Arc::new(pool));
    let users = repo.find_by_company(acme).await.unwrap();

    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![ana, bob]);
    assert!(users.iter().all(|u| u.company_id == acme));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_unknown_company_has_no_users(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let users = repo.find_by_company(404).await.unwrap();

    assert!(users.is_empty());
}
