//! Named domain failures with stable `details.code` discriminators.
//!
//! Inbound adapters map the [`ErrorCode`](super::ErrorCode) to a status and
//! pass `details` through untouched, so clients can branch on
//! `details.code` without parsing messages.

use serde_json::json;

use super::ports::{SchoolRepositoryError, StudentRepositoryError};
use super::{Error, ReferCode};

/// Another school already registered this email.
pub fn duplicate_email() -> Error {
    Error::conflict("a school with this email is already registered")
        .with_details(json!({ "code": "duplicate_email", "field": "email" }))
}

/// The derived refer code is already owned by another school.
pub fn duplicate_refer_code(refer_code: &str, support_contact: &str) -> Error {
    Error::conflict(format!(
        "refer code {refer_code} is already assigned to another school; contact {support_contact} to complete registration"
    ))
    .with_details(json!({
        "code": "duplicate_refer_code",
        "referCode": refer_code,
        "supportContact": support_contact,
    }))
}

/// No school owns the submitted refer code.
pub fn unknown_refer_code(refer_code: &ReferCode) -> Error {
    Error::not_found(format!("no school found for refer code {refer_code}")).with_details(json!({
        "code": "unknown_refer_code",
        "field": "schoolReferCode",
    }))
}

/// Login failed. Deliberately silent about which part was wrong.
pub fn invalid_credentials() -> Error {
    Error::unauthorized("invalid email or password")
        .with_details(json!({ "code": "invalid_credentials" }))
}

/// No usable session token accompanied the request.
pub fn not_logged_in() -> Error {
    Error::unauthorized("not logged in").with_details(json!({ "code": "not_logged_in" }))
}

/// The session token is authentic but past its expiry.
pub fn token_expired() -> Error {
    Error::unauthorized("session expired; log in again")
        .with_details(json!({ "code": "token_expired" }))
}

/// The session token signature does not match its contents.
pub fn tampered_token() -> Error {
    Error::forbidden("session token failed verification")
        .with_details(json!({ "code": "tampered_token" }))
}

/// Map school store failures raised on the registration path.
pub(crate) fn school_store_error(error: SchoolRepositoryError, support_contact: &str) -> Error {
    match error {
        SchoolRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("school repository unavailable: {message}"))
        }
        SchoolRepositoryError::Query { message } => {
            Error::internal(format!("school repository error: {message}"))
        }
        SchoolRepositoryError::DuplicateEmail { .. } => duplicate_email(),
        SchoolRepositoryError::DuplicateReferCode { refer_code } => {
            duplicate_refer_code(&refer_code, support_contact)
        }
    }
}

/// Map school store failures on read paths, where duplicates cannot occur.
pub(crate) fn school_lookup_error(error: SchoolRepositoryError) -> Error {
    match error {
        SchoolRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("school repository unavailable: {message}"))
        }
        other => Error::internal(format!("school repository error: {other}")),
    }
}

pub(crate) fn student_store_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
    }
}
