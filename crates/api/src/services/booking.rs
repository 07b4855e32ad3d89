//! Slot reservation and the doctor's appointment list.

use campuscare_core::{
    errors::{CareError, CareResult},
    models::appointment::{
        Appointment, AppointmentDetail, BookSlotRequest, BookSlotResponse, NewAppointment,
    },
};
use tracing::info;
use uuid::Uuid;

use super::{parse_id, required};
use crate::ApiState;

/// Reserves the slot matching the requested times exactly and records the appointment.
///
/// The store flips `is_booked` only while it is still false, so of two
/// concurrent requests for one slot exactly one succeeds. A slot that never
/// existed and one that is already taken are reported the same way.
///
/// # Errors
///
/// * `CareError::Validation` - a field is blank or malformed
/// * `CareError::NotFound` - unknown student, or no free slot with those times
pub async fn book_slot(
    state: &ApiState,
    doctor_id: Uuid,
    request: &BookSlotRequest,
) -> CareResult<Appointment> {
    let student_id = parse_id(required(&request.student_id, "studentId")?, "studentId")?;
    let date = state.clock.parse_date(required(&request.date, "date")?)?;
    let start = state.clock.parse_time(required(&request.start_time, "startTime")?)?;
    let end = state.clock.parse_time(required(&request.end_time, "endTime")?)?;
    let symptoms = required(&request.symptoms, "symptoms")?;

    state
        .store
        .find_student(student_id)
        .await?
        .ok_or_else(|| CareError::not_found(format!("Student with ID {} not found", student_id)))?;

    let booking = NewAppointment {
        student_id,
        doctor_id,
        date,
        start_time: state.clock.local_instant(date, start)?,
        end_time: state.clock.local_instant(date, end)?,
        symptoms: symptoms.to_string(),
    };

    let appointment = state
        .store
        .book_slot(booking)
        .await?
        .ok_or_else(|| CareError::not_found("Time slot not available or already booked"))?;

    info!(
        "Slot booked: appointment={}, doctor={}, student={}, date={}",
        appointment.id, doctor_id, student_id, date
    );
    Ok(appointment)
}

pub fn render_booking(state: &ApiState, appointment: &Appointment) -> BookSlotResponse {
    BookSlotResponse {
        id: appointment.id,
        student_id: appointment.student_id,
        doctor_id: appointment.doctor_id,
        date: state.clock.format_date(appointment.date),
        start_time: state.clock.format_time(appointment.start_time),
        end_time: state.clock.format_time(appointment.end_time),
        symptoms: appointment.symptoms.clone(),
        created_at: appointment.created_at,
    }
}

/// All of a doctor's appointments, earliest first, with the student's name.
pub async fn list_appointments(
    state: &ApiState,
    doctor_id: Uuid,
) -> CareResult<Vec<AppointmentDetail>> {
    let mut appointments = state.store.appointments_for_doctor(doctor_id).await?;
    if appointments.is_empty() {
        return Err(CareError::not_found("No appointments found for this doctor"));
    }

    appointments.sort_by_key(|entry| (entry.appointment.date, entry.appointment.start_time));

    Ok(appointments
        .into_iter()
        .map(|entry| AppointmentDetail {
            student_name: entry.student_name,
            date: state.clock.format_date(entry.appointment.date),
            start_time: state.clock.format_time(entry.appointment.start_time),
            end_time: state.clock.format_time(entry.appointment.end_time),
            symptoms: entry.appointment.symptoms,
        })
        .collect())
}
