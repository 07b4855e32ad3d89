use axum::{
    body::to_bytes,
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
};
use campuscare_api::middleware::{
    auth::{bearer_token, ensure_subject, issue_token, verify_token},
    error_handling::map_error,
};
use campuscare_core::{
    errors::CareError,
    models::auth::{Claims, Role},
};
use campuscare_db::mock::MockCareStore;
use chrono::Duration;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, server, SECRET};

#[rstest]
#[case::not_found(CareError::NotFound("x".into()), StatusCode::NOT_FOUND)]
#[case::validation(CareError::Validation("x".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(CareError::Conflict("x".into()), StatusCode::BAD_REQUEST)]
#[case::authentication(CareError::Authentication("x".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(CareError::Authorization("x".into()), StatusCode::FORBIDDEN)]
#[case::database(CareError::Database(eyre::eyre!("x")), StatusCode::INTERNAL_SERVER_ERROR)]
fn maps_errors_to_status_codes(#[case] error: CareError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn error_envelope_carries_the_message() {
    let response = map_error(CareError::NotFound("No dates found for this doctor".into()));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body,
        json!({
            "statusCode": 404,
            "message": "No dates found for this doctor",
            "data": null,
            "success": false,
        })
    );
}

#[tokio::test]
async fn server_errors_hide_their_cause() {
    let response = map_error(CareError::Database(eyre::eyre!("password authentication failed")));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["statusCode"], json!(500));
    assert!(!body["message"].as_str().unwrap().contains("password"));
}

#[test]
fn issued_tokens_verify() {
    let subject = Uuid::new_v4();
    let token = issue_token(SECRET, subject, Role::Student, Duration::minutes(5)).unwrap();

    let claims = verify_token(SECRET, &token).unwrap();
    assert_eq!(claims.sub, subject);
    assert_eq!(claims.role, Role::Student);
}

#[test]
fn tokens_signed_with_another_secret_are_rejected() {
    let token = issue_token("other", Uuid::new_v4(), Role::Doctor, Duration::minutes(5)).unwrap();

    assert!(matches!(
        verify_token(SECRET, &token),
        Err(CareError::Authentication(_))
    ));
}

#[test]
fn expired_tokens_are_rejected() {
    let token = issue_token(SECRET, Uuid::new_v4(), Role::Doctor, Duration::hours(-1)).unwrap();

    assert!(matches!(
        verify_token(SECRET, &token),
        Err(CareError::Authentication(_))
    ));
}

#[rstest]
#[case::missing(None)]
#[case::wrong_scheme(Some("Basic abc"))]
#[case::empty(Some("Bearer   "))]
fn malformed_authorization_headers_are_rejected(#[case] header: Option<&str>) {
    assert!(matches!(bearer_token(header), Err(CareError::Authentication(_))));
}

#[test]
fn bearer_token_strips_the_scheme() {
    assert_eq!(bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
}

#[test]
fn subjects_act_only_for_themselves() {
    let id = Uuid::new_v4();
    let claims = Claims {
        sub: id,
        role: Role::Doctor,
        exp: 0,
    };

    assert!(ensure_subject(&claims, id).is_ok());
    assert!(matches!(
        ensure_subject(&claims, Uuid::new_v4()),
        Err(CareError::Authorization(_))
    ));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let response = server(MockCareStore::new()).get("/api/v1/alerts").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn garbage_tokens_are_unauthorized() {
    let response = server(MockCareStore::new())
        .get("/api/v1/alerts")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn students_cannot_reach_doctor_routes() {
    let student_id = Uuid::new_v4();
    let (name, value) = bearer(Role::Student, student_id);
    let response = server(MockCareStore::new())
        .get(&format!("/api/v1/appointments/doctors/{}/dates", student_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_ids_are_validation_errors() {
    let (name, value) = bearer(Role::Student, Uuid::new_v4());
    let response = server(MockCareStore::new())
        .get("/api/v1/appointments/doctors/not-a-uuid/availability")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_uses_the_error_envelope() {
    let doctor_id = Uuid::new_v4();
    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(MockCareStore::new())
        .post(&format!("/api/v1/appointments/doctors/{}/availability", doctor_id))
        .add_header(name, value)
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn health_needs_no_token() {
    let response = server(MockCareStore::new()).get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}
