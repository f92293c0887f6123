//! School API handlers.
//!
//! ```text
//! POST /api/school/register {"name":"DAV Public School","affiliationCode":"CBSE012345",...}
//! POST /api/school/login {"email":"office@dav.edu.in","password":"s3cure-pass"}
//! GET /api/school/dashboard
//! GET /api/school/students/search?query=asha
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Dashboard, FieldValidationError, IssuedSession, LoginCredentials, SchoolProfile,
    SchoolRegistration, SchoolRegistrationParts, StudentSummary,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SchoolSession;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::schemas::{
    DashboardSchema, ErrorSchema, SchoolProfileSchema, StudentSummarySchema,
};
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/school/register`.
///
/// Absent fields deserialise as empty strings so validation reports them as
/// `missing_field` against their wire name.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolRegistrationRequest {
    pub name: String,
    pub affiliation_code: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub pin_code: String,
    pub password: String,
}

impl TryFrom<SchoolRegistrationRequest> for SchoolRegistration {
    type Error = FieldValidationError;

    fn try_from(value: SchoolRegistrationRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(SchoolRegistrationParts {
            name: &value.name,
            affiliation_code: &value.affiliation_code,
            phone: &value.phone,
            email: &value.email,
            city: &value.city,
            pin_code: &value.pin_code,
            password: &value.password,
        })
    }
}

/// Login body for `POST /api/school/login`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = FieldValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for school-scoped endpoints.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedSession> for LoginResponse {
    fn from(value: IssuedSession) -> Self {
        Self {
            token: value.token.into_inner(),
            expires_at: value.expires_at,
        }
    }
}

/// Query string for the student search endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct StudentSearchParams {
    /// Case-insensitive fragment of a student's name or email.
    pub query: String,
}

/// Register a school and assign its refer code.
///
/// The refer code is derived from the affiliation code, school name and pin
/// code. A collision with an existing school is rejected with
/// `duplicate_refer_code`; nothing is overwritten.
#[utoipa::path(
    post,
    path = "/api/school/register",
    request_body = SchoolRegistrationRequest,
    responses(
        (status = 201, description = "School registered", body = SchoolProfileSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email or refer code already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["schools"],
    operation_id = "registerSchool",
    security([])
)]
#[post("/school/register")]
pub async fn register_school(
    state: web::Data<HttpState>,
    payload: web::Json<SchoolRegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let registration = SchoolRegistration::try_from(payload.into_inner())?;
    let profile: SchoolProfile = state.registration.register_school(registration).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Exchange school credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/school/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["schools"],
    operation_id = "loginSchool",
    security([])
)]
#[post("/school/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let issued = state.sessions.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse::from(issued)))
}

/// Dashboard of students registered under the caller's refer code.
#[utoipa::path(
    get,
    path = "/api/school/dashboard",
    responses(
        (
            status = 200,
            description = "Dashboard",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = DashboardSchema
        ),
        (status = 401, description = "Not logged in or session expired", body = ErrorSchema),
        (status = 403, description = "Token failed verification", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["schools"],
    operation_id = "getSchoolDashboard"
)]
#[get("/school/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SchoolSession,
) -> ApiResult<HttpResponse> {
    let dashboard: Dashboard = state.dashboard.get_dashboard(session.identity()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(dashboard))
}

/// Search the caller's students by name or email.
#[utoipa::path(
    get,
    path = "/api/school/students/search",
    params(StudentSearchParams),
    responses(
        (status = 200, description = "Matching students", body = [StudentSummarySchema]),
        (status = 400, description = "Blank or oversized query", body = ErrorSchema),
        (status = 401, description = "Not logged in or session expired", body = ErrorSchema),
        (status = 403, description = "Token failed verification", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["schools"],
    operation_id = "searchSchoolStudents"
)]
#[get("/school/students/search")]
pub async fn search_students(
    state: web::Data<HttpState>,
    session: SchoolSession,
    params: web::Query<StudentSearchParams>,
) -> ApiResult<HttpResponse> {
    let matches: Vec<StudentSummary> = state
        .dashboard
        .search_students(session.identity(), &params.query)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(matches))
}

#[cfg(test)]
#[path = "schools_tests.rs"]
mod tests;
