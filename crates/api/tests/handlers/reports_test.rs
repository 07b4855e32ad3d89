use axum::http::StatusCode;
use campuscare_core::models::{auth::Role, report::ReportChanges};
use campuscare_db::mock::MockCareStore;
use chrono::NaiveDate;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, report, server, student};

fn report_body() -> Value {
    json!({
        "name": "Asha Verma",
        "dob": "2003-04-12",
        "bloodGroup": "B+",
        "medications": "Cetirizine",
        "allergies": "Dust",
        "diseases": " Seasonal rhinitis ",
    })
}

#[test_log::test(tokio::test)]
async fn doctor_files_a_report() {
    let doctor_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store
        .expect_find_student()
        .with(eq(student_id))
        .returning(|id| Ok(Some(student(id))));
    store
        .expect_insert_report()
        .withf(move |new| {
            new.student_id == student_id
                && new.doctor_id == doctor_id
                && new.dob == NaiveDate::from_ymd_opt(2003, 4, 12).unwrap()
                && new.diseases == "Seasonal rhinitis"
        })
        .times(1)
        .returning(|new| {
            let mut filed = report(new.student_id, new.doctor_id, &new.diseases);
            filed.blood_group = new.blood_group;
            Ok(filed)
        });

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .post(&format!(
            "/api/v1/reports/doctors/{}/students/{}",
            doctor_id, student_id
        ))
        .add_header(name, value)
        .json(&report_body())
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["studentId"], json!(student_id.to_string()));
    assert_eq!(body["data"]["bloodGroup"], json!("B+"));
    assert_eq!(body["data"]["diseases"], json!("Seasonal rhinitis"));
}

#[rstest::rstest]
#[case::blank_name("name", json!(""))]
#[case::bad_dob("dob", json!("12/04/2003"))]
#[case::missing_allergies("allergies", Value::Null)]
#[tokio::test]
async fn incomplete_reports_are_rejected(#[case] field: &str, #[case] replacement: Value) {
    let doctor_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_insert_report().never();

    let mut body = report_body();
    match replacement {
        Value::Null => {
            body.as_object_mut().unwrap().remove(field);
        }
        value => body[field] = value,
    }

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .post(&format!(
            "/api/v1/reports/doctors/{}/students/{}",
            doctor_id,
            Uuid::new_v4()
        ))
        .add_header(name, value)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reports_for_unknown_students_are_not_found() {
    let doctor_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|_| Ok(None));
    store.expect_insert_report().never();

    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(store)
        .post(&format!(
            "/api/v1/reports/doctors/{}/students/{}",
            doctor_id,
            Uuid::new_v4()
        ))
        .add_header(name, value)
        .json(&report_body())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], json!("Student not found"));
}

#[rstest::rstest]
#[case::doctor(Role::Doctor)]
#[case::the_student(Role::Student)]
#[tokio::test]
async fn reports_are_listed_newest_first(#[case] role: Role) {
    let student_id = Uuid::new_v4();
    let doctor_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store
        .expect_reports_for_student()
        .with(eq(student_id))
        .returning(move |id| Ok(vec![report(id, doctor_id, "Migraine"), report(id, doctor_id, "Flu")]));

    let subject = if role == Role::Student { student_id } else { doctor_id };
    let (name, value) = bearer(role, subject);
    let response = server(store)
        .get(&format!("/api/v1/reports/students/{}", student_id))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let diseases: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["diseases"].as_str().unwrap())
        .collect();
    assert_eq!(diseases, vec!["Migraine", "Flu"]);
}

#[tokio::test]
async fn students_cannot_read_another_students_reports() {
    let mut store = MockCareStore::new();
    store.expect_reports_for_student().never();
    store.expect_latest_report().never();

    let (name, value) = bearer(Role::Student, Uuid::new_v4());
    let server = server(store);

    server
        .get(&format!("/api/v1/reports/students/{}", Uuid::new_v4()))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .get(&format!("/api/v1/reports/students/{}/latest", Uuid::new_v4()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn student_reads_their_latest_report() {
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store
        .expect_latest_report()
        .with(eq(student_id))
        .returning(|id| Ok(Some(report(id, Uuid::new_v4(), "Anaemia"))));

    let (name, value) = bearer(Role::Student, student_id);
    let response = server(store)
        .get(&format!("/api/v1/reports/students/{}/latest", student_id))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["diseases"], json!("Anaemia"));
}

#[tokio::test]
async fn no_reports_is_not_found() {
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store.expect_reports_for_student().returning(|_| Ok(vec![]));

    let (name, value) = bearer(Role::Student, student_id);
    let response = server(store)
        .get(&format!("/api/v1/reports/students/{}", student_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        json!("No reports found for this student")
    );
}

#[tokio::test]
async fn doctor_amends_only_the_sent_fields_of_the_latest_report() {
    let student_id = Uuid::new_v4();
    let latest = report(student_id, Uuid::new_v4(), "Flu");
    let latest_id = latest.id;
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store
        .expect_latest_report()
        .returning(move |_| Ok(Some(latest.clone())));
    store
        .expect_update_report()
        .with(
            eq(latest_id),
            eq(ReportChanges {
                medications: Some("Paracetamol".to_string()),
                ..ReportChanges::default()
            }),
        )
        .times(1)
        .returning(move |_, changes| {
            let mut updated = report(student_id, Uuid::new_v4(), "Flu");
            updated.medications = changes.medications.unwrap_or_default();
            Ok(Some(updated))
        });

    let (name, value) = bearer(Role::Doctor, Uuid::new_v4());
    let response = server(store)
        .patch(&format!("/api/v1/reports/students/{}/latest", student_id))
        .add_header(name, value)
        .json(&json!({ "medications": " Paracetamol " }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["medications"], json!("Paracetamol"));
}

#[rstest::rstest]
#[case::nothing_sent(json!({}))]
#[case::blank_field(json!({ "allergies": "  " }))]
#[tokio::test]
async fn empty_amendments_are_rejected(#[case] payload: Value) {
    let mut store = MockCareStore::new();
    store.expect_update_report().never();

    let (name, value) = bearer(Role::Doctor, Uuid::new_v4());
    let response = server(store)
        .patch(&format!("/api/v1/reports/students/{}/latest", Uuid::new_v4()))
        .add_header(name, value)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn students_cannot_amend_reports() {
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_update_report().never();

    let (name, value) = bearer(Role::Student, student_id);
    let response = server(store)
        .patch(&format!("/api/v1/reports/students/{}/latest", student_id))
        .add_header(name, value)
        .json(&json!({ "diseases": "None" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
