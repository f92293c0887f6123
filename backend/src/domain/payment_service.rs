//! Payment confirmation service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::failures::student_store_error;
use crate::domain::ports::{PaymentCommand, StudentRepository};
use crate::domain::{Error, Student, StudentId};

/// Payment service implementing [`PaymentCommand`].
#[derive(Clone)]
pub struct PaymentService<R> {
    students: Arc<R>,
}

impl<R> PaymentService<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R> PaymentCommand for PaymentService<R>
where
    R: StudentRepository,
{
    async fn confirm_payment(&self, student_id: &StudentId) -> Result<Student, Error> {
        let student = self
            .students
            .mark_paid(student_id)
            .await
            .map_err(student_store_error)?
            .ok_or_else(|| {
                Error::not_found(format!("student {student_id} not found"))
                    .with_details(json!({ "code": "unknown_student" }))
            })?;

        info!(student_id = %student.id(), refer_code = %student.refer_code(), "payment confirmed");
        Ok(student)
    }
}
