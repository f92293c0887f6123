//! Payment collaborator webhook.
//!
//! ```text
//! POST /api/payments/confirm {"studentId":"9b2f7c1e-4a51-4d8e-9f0a-6c2d1e3b5a77"}
//! Authorization: Bearer <webhook key>
//! ```
//!
//! The endpoint is disabled (503) until a webhook key is configured.

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Student, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::bearer_token;
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::state::HttpState;

/// Confirmation body for `POST /api/payments/confirm`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentConfirmationRequest {
    #[schema(example = "9b2f7c1e-4a51-4d8e-9f0a-6c2d1e3b5a77")]
    pub student_id: String,
}

fn webhook_disabled() -> Error {
    Error::service_unavailable("payment confirmation is not configured")
        .with_details(json!({ "code": "webhook_disabled" }))
}

fn invalid_webhook_key() -> Error {
    Error::unauthorized("payment webhook key missing or invalid")
        .with_details(json!({ "code": "invalid_webhook_key" }))
}

/// Compare keys through their digests so the comparison time does not track
/// the length of the common prefix.
fn keys_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

fn parse_student_id(raw: &str) -> Result<StudentId, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request("studentId is required")
            .with_details(json!({ "field": "studentId", "code": "missing_field" })));
    }
    Uuid::parse_str(trimmed)
        .map(StudentId::from_uuid)
        .map_err(|_| {
            Error::invalid_request("studentId must be a valid UUID")
                .with_details(json!({ "field": "studentId", "code": "invalid_uuid" }))
        })
}

/// Mark a student's registration as paid.
///
/// Confirming an already-paid student returns it unchanged.
#[utoipa::path(
    post,
    path = "/api/payments/confirm",
    request_body = PaymentConfirmationRequest,
    responses(
        (status = 200, description = "Payment recorded", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Webhook key missing or invalid", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema),
        (status = 503, description = "Webhook not configured", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "confirmPayment",
    security(("WebhookKey" = []))
)]
#[post("/payments/confirm")]
pub async fn confirm_payment(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<PaymentConfirmationRequest>,
) -> ApiResult<web::Json<Student>> {
    let expected = state.webhook_key.as_ref().ok_or_else(webhook_disabled)?;
    let presented = bearer_token(&request).ok_or_else(invalid_webhook_key)?;
    if !keys_match(presented, expected.as_str()) {
        warn!("payment webhook called with an unrecognised key");
        return Err(invalid_webhook_key());
    }

    let student_id = parse_student_id(&payload.student_id)?;
    let student = state.payments.confirm_payment(&student_id).await?;
    Ok(web::Json(student))
}
