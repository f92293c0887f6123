//! Student API handlers.
//!
//! ```text
//! POST /api/student/register {"name":"Asha Kumari","email":"asha@example.com","class":"10-A",...}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FieldValidationError, StudentRegistration, StudentRegistrationParts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/student/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "class")]
    pub class_label: String,
    pub phone: String,
    /// Refer code handed out by the student's school.
    pub school_refer_code: String,
}

impl TryFrom<StudentRegistrationRequest> for StudentRegistration {
    type Error = FieldValidationError;

    fn try_from(value: StudentRegistrationRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(StudentRegistrationParts {
            name: &value.name,
            email: &value.email,
            class_label: &value.class_label,
            phone: &value.phone,
            school_refer_code: &value.school_refer_code,
        })
    }
}

/// Register a student under a school's refer code.
///
/// New students start with `pending` payment status.
#[utoipa::path(
    post,
    path = "/api/student/register",
    request_body = StudentRegistrationRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown refer code", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "registerStudent",
    security([])
)]
#[post("/student/register")]
pub async fn register_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentRegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let registration = StudentRegistration::try_from(payload.into_inner())?;
    let student = state.registration.register_student(registration).await?;
    Ok(HttpResponse::Created().json(student))
}
