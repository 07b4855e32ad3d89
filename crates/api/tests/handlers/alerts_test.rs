use axum::http::StatusCode;
use campuscare_core::models::auth::Role;
use campuscare_db::mock::MockCareStore;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{alert, bearer, doctor, server};

#[tokio::test]
async fn doctor_posts_an_alert() {
    let doctor_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_doctor().returning(|id| Ok(Some(doctor(id))));
    store
        .expect_insert_alert()
        .with(eq(doctor_id), eq("Clinic closes early today".to_string()))
        .times(1)
        .returning(|owner, message| Ok(alert(owner, &message)));

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .post(&format!("/api/v1/alerts/doctors/{}/alert", doctor_id))
        .add_header(name, value)
        .json(&json!({ "message": " Clinic closes early today " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["message"], json!("Clinic closes early today"));
    assert_eq!(body["data"]["owner"], json!(doctor_id.to_string()));
}

#[tokio::test]
async fn blank_alerts_are_rejected() {
    let doctor_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_insert_alert().never();

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .post(&format!("/api/v1/alerts/doctors/{}/alert", doctor_id))
        .add_header(name, value)
        .json(&json!({ "message": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest::rstest]
#[case::doctor(Role::Doctor)]
#[case::student(Role::Student)]
#[tokio::test]
async fn everyone_signed_in_reads_alerts(#[case] role: Role) {
    let mut store = MockCareStore::new();
    store
        .expect_list_alerts()
        .returning(|| Ok(vec![alert(Uuid::new_v4(), "Flu shots on Friday")]));

    let (name, value) = bearer(role, Uuid::new_v4());
    let response = server(store)
        .get("/api/v1/alerts")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"][0]["message"], json!("Flu shots on Friday"));
    assert_eq!(body["data"][0]["ownerName"], json!("Dr. Rao"));
}

#[tokio::test]
async fn owner_edits_an_alert() {
    let doctor_id = Uuid::new_v4();
    let existing = alert(doctor_id, "Old notice");
    let alert_id = existing.id;
    let mut store = MockCareStore::new();
    store
        .expect_find_alert()
        .with(eq(alert_id))
        .returning(move |_| Ok(Some(existing.clone())));
    store
        .expect_update_alert()
        .with(eq(alert_id), eq("New notice".to_string()))
        .times(1)
        .returning(move |_, message| Ok(Some(alert(doctor_id, &message))));

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .put(&format!("/api/v1/alerts/{}", alert_id))
        .add_header(name, value)
        .json(&json!({ "message": "New notice" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["message"], json!("New notice"));
}

#[tokio::test]
async fn other_doctors_cannot_delete_an_alert() {
    let existing = alert(Uuid::new_v4(), "Mine");
    let alert_id = existing.id;
    let mut store = MockCareStore::new();
    store
        .expect_find_alert()
        .returning(move |_| Ok(Some(existing.clone())));
    store.expect_delete_alert().never();

    let (name, value) = bearer(Role::Doctor, Uuid::new_v4());
    let response = server(store)
        .delete(&format!("/api/v1/alerts/{}", alert_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_deletes_an_alert() {
    let doctor_id = Uuid::new_v4();
    let existing = alert(doctor_id, "Mine");
    let alert_id = existing.id;
    let mut store = MockCareStore::new();
    store
        .expect_find_alert()
        .returning(move |_| Ok(Some(existing.clone())));
    store
        .expect_delete_alert()
        .with(eq(alert_id))
        .times(1)
        .returning(|_| Ok(true));

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .delete(&format!("/api/v1/alerts/{}", alert_id))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn missing_alert_is_not_found() {
    let mut store = MockCareStore::new();
    store.expect_find_alert().returning(|_| Ok(None));

    let (name, value) = bearer(Role::Doctor, Uuid::new_v4());
    let response = server(store)
        .put(&format!("/api/v1/alerts/{}", Uuid::new_v4()))
        .add_header(name, value)
        .json(&json!({ "message": "Anything" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
