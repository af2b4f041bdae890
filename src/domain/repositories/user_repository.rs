//! Repository trait for resolving company members.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the company user directory.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists the users of a company.
    ///
    /// The returned order is the resolution order of the report: aggregated
    /// data is laid out in exactly this sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_company(&self, company_id: i64) -> Result<Vec<User>, AppError>;
}
