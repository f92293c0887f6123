//! In-process portal wiring shared by the integration suites.
//!
//! Builds the real domain services over the in-memory repositories so tests
//! exercise the full request path without PostgreSQL.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use school_portal::Trace;
use school_portal::domain::ports::FixturePasswordHasher;
use school_portal::domain::{
    DashboardService, PaymentService, RegistrationService, SchoolSessionService,
};
use school_portal::inbound::http::configure_api;
use school_portal::inbound::http::state::{HttpState, HttpStatePorts};
use school_portal::inbound::http::token_config::WebhookKey;
use school_portal::outbound::memory::{InMemorySchoolRepository, InMemoryStudentRepository};
use school_portal::outbound::security::HmacSessionTokenCodec;

pub const SUPPORT_CONTACT: &str = "help@schoolportal.test";
pub const WEBHOOK_KEY: &str = "whk_integration_7c41";
pub const PASSWORD: &str = "s3cure-pass";

/// Build HTTP state backed by fresh in-memory stores.
pub fn portal_state(token_ttl: Duration) -> web::Data<HttpState> {
    let schools = Arc::new(InMemorySchoolRepository::new());
    let students = Arc::new(InMemoryStudentRepository::new());
    let hasher = Arc::new(FixturePasswordHasher);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let codec = Arc::new(HmacSessionTokenCodec::new(Zeroizing::new(
        b"integration-secret-0123456789abcdef".to_vec(),
    )));

    let ports = HttpStatePorts {
        registration: Arc::new(RegistrationService::new(
            schools.clone(),
            students.clone(),
            hasher.clone(),
            clock.clone(),
            SUPPORT_CONTACT,
        )),
        sessions: Arc::new(SchoolSessionService::new(
            schools, hasher, codec, clock, token_ttl,
        )),
        dashboard: Arc::new(DashboardService::new(students.clone())),
        payments: Arc::new(PaymentService::new(students)),
    };
    web::Data::new(HttpState::new(ports, Some(WebhookKey::new(WEBHOOK_KEY))))
}

/// Application with the API mounted the way the server mounts it.
pub fn portal_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
}

/// Send a request and decode the JSON body.
pub async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

/// Registration payload for a school with the given identifying attributes.
pub fn school_payload(name: &str, affiliation_code: &str, pin_code: &str, email: &str) -> Value {
    json!({
        "name": name,
        "affiliationCode": affiliation_code,
        "phone": "9876543210",
        "email": email,
        "city": "Patna",
        "pinCode": pin_code,
        "password": PASSWORD,
    })
}

pub fn register_school(payload: &Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/school/register")
        .set_json(payload)
}

pub fn register_student(name: &str, email: &str, refer_code: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/student/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "class": "10-A",
            "phone": "9876501234",
            "schoolReferCode": refer_code,
        }))
}

pub fn login(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/school/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn dashboard(token: Option<&str>) -> test::TestRequest {
    with_bearer(test::TestRequest::get().uri("/api/school/dashboard"), token)
}

pub fn search(token: Option<&str>, query: &str) -> test::TestRequest {
    with_bearer(
        test::TestRequest::get().uri(&format!("/api/school/students/search?query={query}")),
        token,
    )
}

pub fn confirm_payment(key: Option<&str>, student_id: &str) -> test::TestRequest {
    with_bearer(
        test::TestRequest::post()
            .uri("/api/payments/confirm")
            .set_json(json!({ "studentId": student_id })),
        key,
    )
}

fn with_bearer(request: test::TestRequest, token: Option<&str>) -> test::TestRequest {
    match token {
        Some(token) => request.insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
        None => request,
    }
}

/// Register a school, log in, and return its refer code and bearer token.
pub async fn onboard_school<S, B>(app: &S, payload: &Value) -> (String, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, profile) = send(app, register_school(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {profile}");
    let refer_code = profile["referCode"].as_str().expect("refer code").to_owned();

    let email = payload["email"].as_str().expect("email");
    let (status, session) = send(app, login(email, PASSWORD)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {session}");
    let token = session["token"].as_str().expect("token").to_owned();
    (refer_code, token)
}
