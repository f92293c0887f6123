//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (schools,
//!   students, payments, health)
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to utoipa
//! - **Security**: the school session bearer token and the payment webhook key
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    DashboardSchema, ErrorCodeSchema, ErrorSchema, PaymentStatusSchema, SchoolProfileSchema,
    StudentSchema, StudentSummarySchema,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut session = Http::new(HttpAuthScheme::Bearer);
        session.bearer_format = Some("JWT".to_owned());
        session.description =
            Some("Session token issued by POST /api/school/login.".to_owned());
        components.add_security_scheme("SchoolSession", SecurityScheme::Http(session));

        let mut webhook = Http::new(HttpAuthScheme::Bearer);
        webhook.description =
            Some("Shared key configured for the payment collaborator.".to_owned());
        components.add_security_scheme("WebhookKey", SecurityScheme::Http(webhook));
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "School portal API",
        description = "School and student registration, refer-code scoped dashboards and payment confirmation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SchoolSession" = [])),
    paths(
        crate::inbound::http::schools::register_school,
        crate::inbound::http::schools::login,
        crate::inbound::http::schools::get_dashboard,
        crate::inbound::http::schools::search_students,
        crate::inbound::http::students::register_student,
        crate::inbound::http::payments::confirm_payment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PaymentStatusSchema,
        SchoolProfileSchema,
        StudentSchema,
        StudentSummarySchema,
        DashboardSchema,
    )),
    tags(
        (name = "schools", description = "School registration, login and dashboards"),
        (name = "students", description = "Student registration"),
        (name = "payments", description = "Payment collaborator webhook"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
