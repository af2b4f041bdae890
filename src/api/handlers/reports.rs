//! Handlers for report endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::report::{
    AckResponse, DownloadQuery, ListReportsQuery, ReportListResponse, ReportResponse,
    TriggerReportRequest,
};
use crate::domain::entities::ReportRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Accepts a consolidated report request and starts it in the background.
///
/// # Endpoint
///
/// `POST /reports/consolidated`
///
/// # Request Body
///
/// ```json
/// {
///   "company_id": 1,
///   "start_date": "2024-01-01T00:00:00",
///   "end_date": "2024-01-31T23:59:59",
///   "email": "cfo@acme.test"
/// }
/// ```
///
/// # Response
///
/// `202 Accepted` as soon as the run is scheduled. The outcome of the run is
/// only visible in the logs and, on success, in the recipient's inbox.
///
/// # Errors
///
/// Returns 400 Bad Request if the email is malformed or the period is inverted.
pub async fn trigger_report_handler(
    State(state): State<AppState>,
    Json(payload): Json<TriggerReportRequest>,
) -> Result<(StatusCode, Json<AckResponse>), AppError> {
    payload.validate()?;

    let request = ReportRequest::from(payload);
    let message = format!(
        "Request received, report in progress. It will be sent to {}",
        request.recipient
    );

    tracing::info!(company_id = request.company_id, "Consolidated report requested");
    // Fire and forget: the handle is dropped, the task keeps running.
    drop(state.pipeline.trigger(request));

    Ok((StatusCode::ACCEPTED, Json(AckResponse { message })))
}

/// Acknowledges a download request for a report file.
///
/// # Endpoint
///
/// `GET /reports/download?file=<name>`
///
/// # Errors
///
/// Returns 400 Bad Request if `file` is missing or blank.
pub async fn download_report_handler(
    Query(query): Query<DownloadQuery>,
) -> Result<Json<AckResponse>, AppError> {
    let file = query.file.trim();
    if file.is_empty() {
        return Err(AppError::bad_request(
            "Query parameter 'file' is required",
            json!({ "parameter": "file" }),
        ));
    }

    Ok(Json(AckResponse {
        message: format!("Downloading file: {file}"),
    }))
}

/// Lists the most recent report records, newest first.
///
/// # Endpoint
///
/// `GET /reports?limit=20`
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is outside `1..=100`.
pub async fn list_reports_handler(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ReportListResponse>, AppError> {
    let limit = query
        .validated_limit()
        .map_err(|e| AppError::bad_request(e, json!({ "parameter": "limit" })))?;

    let total = state.reports.count().await?;
    let items = state
        .reports
        .list_recent(limit)
        .await?
        .into_iter()
        .map(ReportResponse::from)
        .collect();

    Ok(Json(ReportListResponse { total, items }))
}

/// Returns one report record.
///
/// # Endpoint
///
/// `GET /reports/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no record has this id.
pub async fn get_report_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReportResponse>, AppError> {
    let record = state.reports.find_by_id(id).await?.ok_or_else(|| {
        AppError::not_found("Report not found", json!({ "id": id }))
    })?;

    Ok(Json(record.into()))
}
