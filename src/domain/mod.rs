//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`consolidation`] - Values handed between report pipeline stages
//!
//! # Report Flow
//!
//! 1. Users of a company are resolved via [`repositories::UserRepository`]
//! 2. Each user's orders and transactions become a [`consolidation::UserConsolidated`]
//! 3. All users are joined into a [`consolidation::AggregatedReportInput`]
//! 4. The rendered [`consolidation::ReportContent`] is written to a file and
//!    recorded via [`repositories::ReportRepository`]

pub mod consolidation;
pub mod entities;
pub mod repositories;
