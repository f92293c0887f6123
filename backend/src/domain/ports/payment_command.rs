//! Driving port used by the payment collaborator.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Payment confirmation use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentCommand: Send + Sync {
    /// Mark a student's registration fee as paid. Idempotent.
    async fn confirm_payment(&self, student_id: &StudentId) -> Result<Student, Error>;
}
