//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is unavailable; retry later.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message. `details.code` carries a finer discriminator such as
/// `duplicate_refer_code` or `tampered_token`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "a school with this email is already registered")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::PaymentStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PaymentStatus)]
pub enum PaymentStatusSchema {
    /// Registered but not yet paid.
    #[schema(rename = "pending")]
    Pending,
    /// Payment confirmed.
    #[schema(rename = "paid")]
    Paid,
}

/// OpenAPI schema for [`crate::domain::SchoolProfile`].
///
/// Public view of a registered school. The password hash never appears.
#[derive(ToSchema)]
#[schema(as = crate::domain::SchoolProfile)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SchoolProfileSchema {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "DAV Public School")]
    name: String,
    #[schema(example = "CBSE012345")]
    affiliation_code: String,
    #[schema(example = "9876543210")]
    phone: String,
    #[schema(example = "office@dav.edu.in")]
    email: String,
    #[schema(example = "Patna")]
    city: String,
    #[schema(example = "800001")]
    pin_code: String,
    /// Join key students use to link themselves to this school.
    #[schema(example = "CBSEDAVP800001")]
    refer_code: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::StudentSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StudentSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSummarySchema {
    #[schema(example = "Asha Kumari")]
    name: String,
    #[schema(example = "asha@example.com")]
    email: String,
    #[schema(example = "10-A")]
    class: String,
    status: PaymentStatusSchema,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    #[schema(value_type = String, example = "9b2f7c1e-4a51-4d8e-9f0a-6c2d1e3b5a77")]
    id: String,
    #[schema(example = "Asha Kumari")]
    name: String,
    #[schema(example = "asha@example.com")]
    email: String,
    #[schema(rename = "class", example = "10-A")]
    class_label: String,
    #[schema(example = "9876501234")]
    phone: String,
    #[schema(example = "CBSEDAVP800001")]
    school_refer_code: String,
    status: PaymentStatusSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Dashboard`].
///
/// Aggregate view scoped to the authenticated school's refer code.
#[derive(ToSchema)]
#[schema(as = crate::domain::Dashboard)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DashboardSchema {
    #[schema(example = 3)]
    total_students: u64,
    #[schema(example = 1)]
    paid: u64,
    #[schema(example = 2)]
    pending: u64,
    students: Vec<StudentSummarySchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case(ErrorCodeSchema::name(), "crate.domain.ErrorCode")]
    #[case(ErrorSchema::name(), "crate.domain.Error")]
    #[case(PaymentStatusSchema::name(), "crate.domain.PaymentStatus")]
    #[case(SchoolProfileSchema::name(), "crate.domain.SchoolProfile")]
    #[case(StudentSummarySchema::name(), "crate.domain.StudentSummary")]
    #[case(StudentSchema::name(), "crate.domain.Student")]
    #[case(DashboardSchema::name(), "crate.domain.Dashboard")]
    fn schemas_are_registered_under_domain_names(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        // utoipa replaces :: with . in schema names
        assert_eq!(name, expected);
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for variant in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(variant), "missing {variant}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"), "schema should contain traceId");
        assert!(schema_json.contains("details"), "schema should contain details");
    }

    #[test]
    fn school_profile_schema_omits_password_material() {
        let schema_json = schema_to_json::<SchoolProfileSchema>();
        assert!(schema_json.contains("referCode"));
        assert!(schema_json.contains("affiliationCode"));
        assert!(!schema_json.contains("password"));
    }

    #[test]
    fn student_schemas_expose_class_and_status() {
        let summary = schema_to_json::<StudentSummarySchema>();
        assert!(summary.contains("\"class\""));
        assert!(summary.contains("status"));

        let student = schema_to_json::<StudentSchema>();
        assert!(student.contains("\"class\""));
        assert!(student.contains("schoolReferCode"));
        assert!(!student.contains("class_label"));
    }

    #[test]
    fn dashboard_schema_uses_camel_case_totals() {
        let schema_json = schema_to_json::<DashboardSchema>();
        assert!(schema_json.contains("totalStudents"));
        assert!(schema_json.contains("students"));
    }
}
