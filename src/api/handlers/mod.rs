//! HTTP request handlers for API endpoints.

pub mod health;
pub mod reports;

pub use health::health_handler;
pub use reports::{
    download_report_handler, get_report_handler, list_reports_handler, trigger_report_handler,
};
