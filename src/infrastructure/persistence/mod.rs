//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Company user directory
//! - [`PgReportRepository`] - Report metadata records

pub mod pg_report_repository;
pub mod pg_user_repository;

pub use pg_report_repository::PgReportRepository;
pub use pg_user_repository::PgUserRepository;
