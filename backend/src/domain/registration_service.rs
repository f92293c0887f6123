//! Registration service: refer code assignment and student linkage.
//!
//! Schools receive the refer code derived from their own attributes. When
//! that code (or the school's email) is already taken the registration is
//! rejected outright; nothing is overwritten and no alternative code is
//! invented. Uniqueness is checked up front for a clear error and enforced
//! again by the store at insert time, which resolves concurrent races.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::failures::{
    duplicate_email, duplicate_refer_code, school_lookup_error, school_store_error,
    student_store_error, unknown_refer_code,
};
use crate::domain::ports::{
    PasswordHasher, PasswordHasherError, RegistrationCommand, SchoolRepository,
    SchoolRepositoryError, StudentRepository,
};
use crate::domain::{Error, School, SchoolProfile, SchoolRegistration, Student, StudentRegistration};

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("credential hashing failed: {error}"))
}

/// Registration service implementing [`RegistrationCommand`].
#[derive(Clone)]
pub struct RegistrationService<S, T, H> {
    schools: Arc<S>,
    students: Arc<T>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    support_contact: String,
}

impl<S, T, H> RegistrationService<S, T, H> {
    /// Create a registration service.
    ///
    /// `support_contact` is quoted to schools whose refer code collides.
    pub fn new(
        schools: Arc<S>,
        students: Arc<T>,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
        support_contact: impl Into<String>,
    ) -> Self {
        Self {
            schools,
            students,
            hasher,
            clock,
            support_contact: support_contact.into(),
        }
    }
}

#[async_trait]
impl<S, T, H> RegistrationCommand for RegistrationService<S, T, H>
where
    S: SchoolRepository,
    T: StudentRepository,
    H: PasswordHasher,
{
    async fn register_school(
        &self,
        registration: SchoolRegistration,
    ) -> Result<SchoolProfile, Error> {
        let map_store = |error: SchoolRepositoryError| school_store_error(error, &self.support_contact);

        if self
            .schools
            .find_by_email(registration.email())
            .await
            .map_err(map_store)?
            .is_some()
        {
            return Err(duplicate_email());
        }

        let refer_code = registration.refer_code();
        if self
            .schools
            .find_by_refer_code(&refer_code)
            .await
            .map_err(map_store)?
            .is_some()
        {
            warn!(refer_code = %refer_code, "refer code collision during school registration");
            return Err(duplicate_refer_code(refer_code.as_str(), &self.support_contact));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let school = School::register(&registration, refer_code, password_hash, self.clock.utc());

        self.schools.insert(&school).await.map_err(map_store)?;

        info!(
            school_id = %school.id(),
            refer_code = %school.refer_code(),
            "school registered"
        );
        Ok(school.profile())
    }

    async fn register_student(&self, registration: StudentRegistration) -> Result<Student, Error> {
        let school = self
            .schools
            .find_by_refer_code(registration.refer_code())
            .await
            .map_err(school_lookup_error)?;
        if school.is_none() {
            return Err(unknown_refer_code(registration.refer_code()));
        }

        let student = Student::register(registration, self.clock.utc());
        self.students
            .insert(&student)
            .await
            .map_err(student_store_error)?;

        info!(
            student_id = %student.id(),
            refer_code = %student.refer_code(),
            "student registered"
        );
        Ok(student)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
