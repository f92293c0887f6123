//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - ReferCode / derive_refer_code: the school join key and its deriver.
//! - School, Student: registered aggregates.
//! - RegistrationService, SchoolSessionService, DashboardService,
//!   PaymentService: use-case implementations.

pub mod auth;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod failures;
pub mod fields;
pub mod payment_service;
pub mod ports;
pub mod refer_code;
pub mod registration_service;
pub mod school;
pub mod session_service;
pub mod student;
pub mod trace_id;

pub use self::auth::{
    IssuedSession, LoginCredentials, PasswordHash, SchoolIdentity, SessionClaims, SessionToken,
};
pub use self::dashboard::{Dashboard, SEARCH_QUERY_MAX, StudentSearchQuery};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fields::{EmailAddress, FieldValidationError, PhoneNumber, PinCode};
pub use self::payment_service::PaymentService;
pub use self::refer_code::{ReferCode, ReferCodeValidationError, derive_refer_code};
pub use self::registration_service::RegistrationService;
pub use self::school::{
    PASSWORD_MIN, School, SchoolDraft, SchoolId, SchoolProfile, SchoolRegistration,
    SchoolRegistrationParts,
};
pub use self::session_service::{DEFAULT_TOKEN_TTL_MINUTES, SchoolSessionService};
pub use self::student::{
    PaymentStatus, Student, StudentDraft, StudentId, StudentRegistration,
    StudentRegistrationParts, StudentSummary, UnknownPaymentStatus,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use school_portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
