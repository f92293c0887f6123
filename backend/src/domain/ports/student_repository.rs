//! Port abstraction for student persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ReferCode, Student, StudentId, StudentSearchQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
    }
}

/// Student storage.
///
/// Every read that returns more than one student is filtered by refer code;
/// there is deliberately no "list all" operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a newly registered student.
    async fn insert(&self, student: &Student) -> Result<(), StudentRepositoryError>;

    /// Students registered under `refer_code`, oldest first.
    async fn list_by_refer_code(
        &self,
        refer_code: &ReferCode,
    ) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Students under `refer_code` whose name or email contains the query.
    async fn search(
        &self,
        refer_code: &ReferCode,
        query: &StudentSearchQuery,
    ) -> Result<Vec<Student>, StudentRepositoryError>;

    /// Mark a student as paid, returning the updated record if it exists.
    async fn mark_paid(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError>;
}
