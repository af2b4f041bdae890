//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Company user directory
//! - [`ReportRepository`] - Report metadata records

pub mod report_repository;
pub mod user_repository;

pub use report_repository::ReportRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
