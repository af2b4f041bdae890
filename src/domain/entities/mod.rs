//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] - A company member resolved from the user directory
//! - [`OrderRecord`] / [`TransactionRecord`] - Ledger data fetched per user
//! - [`ReportRecord`] - Metadata of a persisted report file
//! - [`ReportRequest`] - Trigger input of the report pipeline
//!
//! Creation inputs follow the "New Type" pattern: [`NewReportRecord`] carries
//! everything but the store-assigned id.

pub mod ledger;
pub mod report;
pub mod report_request;
pub mod user;

pub use ledger::{OrderRecord, TransactionRecord};
pub use report::{NewReportRecord, ReportRecord};
pub use report_request::ReportRequest;
pub use user::User;
