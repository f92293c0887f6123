//! Driving port for school and student registration.

use async_trait::async_trait;

use crate::domain::{Error, SchoolProfile, SchoolRegistration, Student, StudentRegistration};

/// Registration use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Register a school and assign its refer code.
    ///
    /// Fails with a conflict when the email or the derived refer code is
    /// already taken; existing schools are never overwritten.
    async fn register_school(&self, registration: SchoolRegistration)
    -> Result<SchoolProfile, Error>;

    /// Register a student against an existing school's refer code.
    async fn register_student(&self, registration: StudentRegistration) -> Result<Student, Error>;
}
