//! Port abstraction for school persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, ReferCode, School};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by school repository adapters.
    pub enum SchoolRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "school repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "school repository query failed: {message}",
        /// Another school already uses this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Another school already owns this refer code.
        DuplicateReferCode { refer_code: String } => "refer code already assigned: {refer_code}",
    }
}

/// School storage.
///
/// Implementations must enforce email and refer code uniqueness atomically
/// with the insert and report violations through the duplicate variants, so
/// that two racing registrations can never both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Persist a newly registered school.
    async fn insert(&self, school: &School) -> Result<(), SchoolRepositoryError>;

    /// Fetch a school by its (normalised) email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<School>, SchoolRepositoryError>;

    /// Fetch the school owning a refer code.
    async fn find_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Option<School>, SchoolRepositoryError>;
}
