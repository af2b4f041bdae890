//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the application layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`ledger`] - Order and transaction sources
//! - [`storage`] - Durable report file storage
//! - [`mail`] - Outbound notification channel

pub mod ledger;
pub mod mail;
pub mod persistence;
pub mod storage;
