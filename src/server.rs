//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, adapter selection, pipeline wiring, and Axum
//! server lifecycle.

use crate::application::services::{
    CompanyAggregator, NotificationDispatcher, ReportPersister, ReportPipeline, ReportRenderer,
    UserConsolidationFetcher,
};
use crate::config::Config;
use crate::domain::repositories::{ReportRepository, UserRepository};
use crate::infrastructure::ledger::{HttpLedgerClient, OrderSource, SimulatedLedger, TransactionSource};
use crate::infrastructure::mail::{HttpMailer, LogMailer, Mailer};
use crate::infrastructure::persistence::{PgReportRepository, PgUserRepository};
use crate::infrastructure::storage::{FsReportStorage, ReportStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

const MAIL_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Report directory
/// - Ledger client (or simulated ledger fallback)
/// - Mail relay (or log-only fallback)
/// - Report pipeline
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The report directory cannot be created
/// - An HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let reports: Arc<dyn ReportRepository> = Arc::new(PgReportRepository::new(pool));

    let storage: Arc<dyn ReportStorage> = Arc::new(
        FsReportStorage::open(&config.reports_dir)
            .await
            .context("Failed to open report directory")?,
    );
    tracing::info!("Report storage ready at {}", config.reports_dir);

    let (orders, transactions) = ledger_sources(&config)?;
    let mailer = mailer(&config)?;

    let pipeline = Arc::new(build_pipeline(
        &config,
        users,
        orders,
        transactions,
        storage.clone(),
        reports.clone(),
        mailer,
    ));

    let state = AppState::new(pipeline, reports, storage);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wires the report stages from their collaborators and the pipeline settings.
pub fn build_pipeline(
    config: &Config,
    users: Arc<dyn UserRepository>,
    orders: Arc<dyn OrderSource>,
    transactions: Arc<dyn TransactionSource>,
    storage: Arc<dyn ReportStorage>,
    reports: Arc<dyn ReportRepository>,
    mailer: Arc<dyn Mailer>,
) -> ReportPipeline {
    let fetcher = Arc::new(UserConsolidationFetcher::new(orders, transactions));

    ReportPipeline::new(
        CompanyAggregator::new(users, fetcher, config.failure_policy),
        ReportRenderer::new(),
        ReportPersister::new(storage.clone(), reports, config.cleanup_orphan_files),
        NotificationDispatcher::new(storage, mailer, config.retry_policy()),
    )
    .with_stage_timeout(config.stage_timeout())
    .with_max_concurrent_runs(config.max_concurrent_reports)
}

fn ledger_sources(config: &Config) -> Result<(Arc<dyn OrderSource>, Arc<dyn TransactionSource>)> {
    match &config.ledger_api_url {
        Some(url) => {
            let client = Arc::new(
                HttpLedgerClient::new(url, Duration::from_secs(config.ledger_timeout_secs))
                    .context("Failed to build ledger client")?,
            );
            tracing::info!("Ledger enabled ({url})");
            let orders: Arc<dyn OrderSource> = client.clone();
            let transactions: Arc<dyn TransactionSource> = client;
            Ok((orders, transactions))
        }
        None => {
            let ledger = Arc::new(SimulatedLedger::new(Duration::from_millis(
                config.ledger_simulated_delay_ms,
            )));
            tracing::info!("Ledger disabled (SimulatedLedger)");
            let orders: Arc<dyn OrderSource> = ledger.clone();
            let transactions: Arc<dyn TransactionSource> = ledger;
            Ok((orders, transactions))
        }
    }
}

fn mailer(config: &Config) -> Result<Arc<dyn Mailer>> {
    match &config.mail_api_url {
        Some(url) => {
            let mailer = HttpMailer::new(
                url,
                config.mail_api_token.clone(),
                &config.mail_from,
                MAIL_TIMEOUT,
            )
            .context("Failed to build mail client")?;
            tracing::info!("Mail relay enabled ({url})");
            Ok(Arc::new(mailer))
        }
        None => {
            tracing::info!("Mail relay disabled (LogMailer)");
            Ok(Arc::new(LogMailer::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
