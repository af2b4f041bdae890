//! Report API route configuration.

use crate::api::handlers::{
    download_report_handler, get_report_handler, list_reports_handler, trigger_report_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Report routes, mounted under `/reports`.
///
/// # Endpoints
///
/// - `POST /consolidated` - Start a consolidated report run
/// - `GET  /download`     - Acknowledge a report download
/// - `GET  /`             - Most recent report records
/// - `GET  /{id}`         - One report record
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports_handler))
        .route("/consolidated", post(trigger_report_handler))
        .route("/download", get(download_report_handler))
        .route("/{id}", get(get_report_handler))
}
