//! End-to-end flows over the in-memory adapters.
//!
//! Each test drives the HTTP surface the way a school or the payment
//! collaborator would, with the real services and token codec wired in.

mod portal_support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Duration;
use rstest::rstest;
use serde_json::Value;

use portal_support::{
    PASSWORD, SUPPORT_CONTACT, WEBHOOK_KEY, confirm_payment, dashboard, login, onboard_school,
    portal_app, portal_state, register_school, register_student, school_payload, search, send,
};
use school_portal::domain::derive_refer_code;

fn names(students: &Value) -> Vec<&str> {
    students
        .as_array()
        .expect("student array")
        .iter()
        .map(|student| student["name"].as_str().expect("name"))
        .collect()
}

#[rstest]
#[case("CBSE012345", "DAV Public School", "800001", "CBSEDAVP800001")]
#[case("icse-44", "Kendriya Vidyalaya", "110021", "ICSEKEND110021")]
fn refer_codes_are_deterministic(
    #[case] affiliation: &str,
    #[case] name: &str,
    #[case] pin: &str,
    #[case] expected: &str,
) {
    let first = derive_refer_code(affiliation, name, pin);
    let second = derive_refer_code(affiliation, name, pin);
    assert_eq!(first, second);
    assert_eq!(first.as_str(), expected);
}

#[actix_web::test]
async fn registration_assigns_the_derived_refer_code() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;

    let (status, profile) = send(
        &app,
        register_school(&school_payload(
            "DAV Public School",
            "CBSE012345",
            "800001",
            "office@dav.edu.in",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile["referCode"], "CBSEDAVP800001");
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}

#[actix_web::test]
async fn colliding_refer_code_is_rejected_without_overwriting() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    let (refer_code, token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;

    // Same prefixes and pin, different school and email.
    let (status, error) = send(
        &app,
        register_school(&school_payload(
            "DAV Patna Branch",
            "CBSE099999",
            "800001",
            "branch@dav.edu.in",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");
    assert_eq!(error["details"]["code"], "duplicate_refer_code");
    assert_eq!(error["details"]["referCode"], refer_code.as_str());
    assert_eq!(error["details"]["supportContact"], SUPPORT_CONTACT);

    let (status, _) = send(&app, login("branch@dav.edu.in", PASSWORD)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, dashboard(Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalStudents"], 0);
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;

    let (status, error) = send(
        &app,
        register_school(&school_payload(
            "Modern School",
            "ICSE4411",
            "110001",
            "office@dav.edu.in",
        )),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["details"]["code"], "duplicate_email");
}

#[actix_web::test]
async fn student_with_unknown_refer_code_is_rejected() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;

    let (status, error) = send(
        &app,
        register_student("Asha Kumari", "asha@example.com", "NOPE0000110001"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["details"]["code"], "unknown_refer_code");
}

#[actix_web::test]
async fn forged_token_is_forbidden_while_missing_token_is_unauthorised() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    let (_, dav_token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;
    let (_, other_token) = onboard_school(
        &app,
        &school_payload("Modern School", "ICSE4411", "110001", "admin@modern.edu.in"),
    )
    .await;

    // Splice the other school's claims under this school's signature.
    let dav_parts: Vec<&str> = dav_token.split('.').collect();
    let other_parts: Vec<&str> = other_token.split('.').collect();
    let forged = format!("{}.{}.{}", dav_parts[0], other_parts[1], dav_parts[2]);

    let (status, error) = send(&app, dashboard(Some(&forged))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["details"]["code"], "tampered_token");

    let (signing_input, signature) = dav_token.rsplit_once('.').expect("signature segment");
    let mut flipped: Vec<char> = signature.chars().collect();
    flipped[0] = if flipped[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{signing_input}.{}", flipped.into_iter().collect::<String>());
    let (status, error) = send(&app, dashboard(Some(&tampered))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["details"]["code"], "tampered_token");

    let (status, error) = send(&app, dashboard(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["details"]["code"], "not_logged_in");

    let (status, error) = send(&app, dashboard(Some("not-a-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["details"]["code"], "not_logged_in");
}

#[actix_web::test]
async fn expired_token_is_unauthorised() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::seconds(-1)))).await;
    let (_, token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;

    let (status, error) = send(&app, dashboard(Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["details"]["code"], "token_expired");
}

#[actix_web::test]
async fn dashboards_never_include_another_schools_students() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    let (dav_code, dav_token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;
    let (modern_code, modern_token) = onboard_school(
        &app,
        &school_payload("Modern School", "ICSE4411", "110001", "admin@modern.edu.in"),
    )
    .await;

    for (name, email) in [("Asha Kumari", "asha@example.com"), ("Ravi Singh", "ravi@example.com")] {
        let (status, _) = send(&app, register_student(name, email, &dav_code)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = send(
        &app,
        register_student("Meera Iyer", "meera@example.com", &modern_code),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let dav_requests = (0..8).map(|_| send(&app, dashboard(Some(&dav_token))));
    let modern_requests = (0..8).map(|_| send(&app, dashboard(Some(&modern_token))));
    let (dav_views, modern_views) = futures_util::future::join(
        futures_util::future::join_all(dav_requests),
        futures_util::future::join_all(modern_requests),
    )
    .await;

    for (status, body) in dav_views {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalStudents"], 2);
        let mut listed = names(&body["students"]);
        listed.sort_unstable();
        assert_eq!(listed, vec!["Asha Kumari", "Ravi Singh"]);
    }
    for (status, body) in modern_views {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalStudents"], 1);
        assert_eq!(names(&body["students"]), vec!["Meera Iyer"]);
    }
}

#[actix_web::test]
async fn search_is_scoped_and_keeps_duplicate_registrations_apart() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    let (dav_code, dav_token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;
    let (modern_code, _) = onboard_school(
        &app,
        &school_payload("Modern School", "ICSE4411", "110001", "admin@modern.edu.in"),
    )
    .await;

    let (_, first) = send(&app, register_student("Asha Kumari", "asha@example.com", &dav_code)).await;
    let (_, _second) =
        send(&app, register_student("Asha Kumari", "asha@example.com", &dav_code)).await;
    send(&app, register_student("Asha Verma", "verma@example.com", &modern_code)).await;

    let first_id = first["id"].as_str().expect("student id");
    let (status, _) = send(&app, confirm_payment(Some(WEBHOOK_KEY), first_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, matches) = send(&app, search(Some(&dav_token), "ASHA")).await;
    assert_eq!(status, StatusCode::OK);
    let matches = matches.as_array().expect("matches");
    assert_eq!(matches.len(), 2);
    let mut statuses: Vec<&str> = matches
        .iter()
        .map(|student| student["status"].as_str().expect("status"))
        .collect();
    statuses.sort_unstable();
    assert_eq!(statuses, vec!["paid", "pending"]);

    let (status, none) = send(&app, search(Some(&dav_token), "verma")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, Value::Array(Vec::new()));

    let (status, error) = send(&app, search(Some(&dav_token), "%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[actix_web::test]
async fn payment_webhook_updates_dashboard_totals() {
    let app = actix_test::init_service(portal_app(portal_state(Duration::minutes(30)))).await;
    let (dav_code, dav_token) = onboard_school(
        &app,
        &school_payload("DAV Public School", "CBSE012345", "800001", "office@dav.edu.in"),
    )
    .await;
    let (_, student) = send(&app, register_student("Asha Kumari", "asha@example.com", &dav_code)).await;
    assert_eq!(student["status"], "pending");
    let student_id = student["id"].as_str().expect("student id");

    let (status, error) = send(&app, confirm_payment(Some("whk_wrong"), student_id)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["details"]["code"], "invalid_webhook_key");

    for _ in 0..2 {
        let (status, paid) = send(&app, confirm_payment(Some(WEBHOOK_KEY), student_id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["status"], "paid");
    }

    let (_, body) = send(&app, dashboard(Some(&dav_token))).await;
    assert_eq!(body["paid"], 1);
    assert_eq!(body["pending"], 0);

    let (status, error) = send(
        &app,
        confirm_payment(Some(WEBHOOK_KEY), "00000000-0000-4000-8000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["details"]["code"], "unknown_student");
}
