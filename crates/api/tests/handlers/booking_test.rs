use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::http::StatusCode;
use campuscare_core::models::{appointment::Appointment, auth::Role};
use campuscare_db::mock::MockCareStore;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, local, server, shift_date, student};

fn book_path(doctor_id: Uuid) -> String {
    format!("/api/v1/appointments/doctors/{}/book", doctor_id)
}

fn booking_body(student_id: Uuid) -> Value {
    json!({
        "studentId": student_id.to_string(),
        "date": "2024-09-05",
        "startTime": "10:00",
        "endTime": "10:30",
        "symptoms": "  Persistent cough  ",
    })
}

/// A store holding one open 10:00-10:30 slot that can be taken once
fn store_with_one_open_slot() -> MockCareStore {
    let taken = Arc::new(AtomicBool::new(false));
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store.expect_book_slot().returning(move |booking| {
        let matches = booking.start_time == local("10:00") && booking.end_time == local("10:30");
        if !matches || taken.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(Appointment {
            id: Uuid::new_v4(),
            student_id: booking.student_id,
            doctor_id: booking.doctor_id,
            date: booking.date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            symptoms: booking.symptoms,
            created_at: Utc::now(),
        }))
    });
    store
}

#[test_log::test(tokio::test)]
async fn books_an_open_slot_once() {
    let doctor_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let server = server(store_with_one_open_slot());
    let (name, value) = bearer(Role::Student, student_id);

    let first = server
        .post(&book_path(doctor_id))
        .add_header(name.clone(), value.clone())
        .json(&booking_body(student_id))
        .await;

    first.assert_status(StatusCode::CREATED);
    let body = first.json::<Value>();
    assert_eq!(body["data"]["doctorId"], json!(doctor_id.to_string()));
    assert_eq!(body["data"]["studentId"], json!(student_id.to_string()));
    assert_eq!(body["data"]["date"], json!("2024-09-05"));
    assert_eq!(body["data"]["startTime"], json!("10:00:00"));
    assert_eq!(body["data"]["endTime"], json!("10:30:00"));
    assert_eq!(body["data"]["symptoms"], json!("Persistent cough"));

    let second = server
        .post(&book_path(doctor_id))
        .add_header(name, value)
        .json(&booking_body(student_id))
        .await;

    second.assert_status(StatusCode::NOT_FOUND);
    let body = second.json::<Value>();
    assert_eq!(
        body["message"],
        json!("Time slot not available or already booked")
    );
}

#[tokio::test]
async fn times_that_match_no_slot_are_not_found() {
    let student_id = Uuid::new_v4();
    let (name, value) = bearer(Role::Student, student_id);

    let mut body = booking_body(student_id);
    body["startTime"] = json!("10:15");
    body["endTime"] = json!("10:45");

    let response = server(store_with_one_open_slot())
        .post(&book_path(Uuid::new_v4()))
        .add_header(name, value)
        .json(&body)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_passes_utc_instants_to_the_store() {
    let doctor_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|id| Ok(Some(student(id))));
    store
        .expect_book_slot()
        .withf(move |booking| {
            booking.doctor_id == doctor_id
                && booking.date == shift_date()
                && booking.start_time.to_rfc3339() == "2024-09-05T04:30:00+00:00"
                && booking.symptoms == "Persistent cough"
        })
        .times(1)
        .returning(|_| Ok(None));

    let (name, value) = bearer(Role::Student, student_id);
    server(store)
        .post(&book_path(doctor_id))
        .add_header(name, value)
        .json(&booking_body(student_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_find_student().returning(|_| Ok(None));
    store.expect_book_slot().never();

    let (name, value) = bearer(Role::Student, student_id);
    let response = server(store)
        .post(&book_path(Uuid::new_v4()))
        .add_header(name, value)
        .json(&booking_body(student_id))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[rstest::rstest]
#[case::blank_symptoms("symptoms", json!("   "))]
#[case::missing_date("date", Value::Null)]
#[case::bad_time("startTime", json!("ten o'clock"))]
#[tokio::test]
async fn rejects_incomplete_bookings(#[case] field: &str, #[case] replacement: Value) {
    let student_id = Uuid::new_v4();
    let mut store = MockCareStore::new();
    store.expect_book_slot().never();

    let mut body = booking_body(student_id);
    match replacement {
        Value::Null => {
            body.as_object_mut().unwrap().remove(field);
        }
        value => body[field] = value,
    }

    let (name, value) = bearer(Role::Student, student_id);
    let response = server(store)
        .post(&book_path(Uuid::new_v4()))
        .add_header(name, value)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn students_cannot_book_for_someone_else() {
    let mut store = MockCareStore::new();
    store.expect_book_slot().never();

    let (name, value) = bearer(Role::Student, Uuid::new_v4());
    let response = server(store)
        .post(&book_path(Uuid::new_v4()))
        .add_header(name, value)
        .json(&booking_body(Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn doctors_cannot_book() {
    let doctor_id = Uuid::new_v4();
    let (name, value) = bearer(Role::Doctor, doctor_id);
    let response = server(MockCareStore::new())
        .post(&book_path(doctor_id))
        .add_header(name, value)
        .json(&booking_body(doctor_id))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
