//! # Availability Services
//!
//! Publishing a doctor's shift for a day, reading it back for students and
//! for the doctor, and cancelling it.
//!
//! A shift is stored as one availability record per (doctor, date). Its
//! working window is cut into consecutive slots of `ApiState::slot_length`
//! by [`partition_window`]; any remainder shorter than one slot is dropped.

use std::collections::HashSet;

use campuscare_core::{
    errors::{CareError, CareResult},
    models::availability::{
        AvailabilityRecord, AvailabilityResponse, CancelShiftRequest, CancelShiftResponse,
        CreateAvailabilityRequest, DayAvailability, ShiftDate, SlotTimes, SlotView,
    },
    slots::partition_window,
};
use tracing::info;
use uuid::Uuid;

use super::required;
use crate::ApiState;

/// Publishes a shift for `doctor_id` and returns the stored record.
///
/// # Errors
///
/// * `CareError::Validation` - a field is missing or malformed, or the
///   window cannot hold a single slot
/// * `CareError::NotFound` - the doctor does not exist
/// * `CareError::Conflict` - a shift is already scheduled for that date
pub async fn create_availability(
    state: &ApiState,
    doctor_id: Uuid,
    request: &CreateAvailabilityRequest,
) -> CareResult<AvailabilityRecord> {
    let date = required(&request.date, "date")?;
    let start = required(&request.start_time, "startTime")?;
    let end = required(&request.end_time, "endTime")?;

    let date = state.clock.parse_date(date)?;
    let window_start = state.clock.local_instant(date, state.clock.parse_time(start)?)?;
    let window_end = state.clock.local_instant(date, state.clock.parse_time(end)?)?;
    let slots = partition_window(window_start, window_end, state.slot_length)?;

    state
        .store
        .find_doctor(doctor_id)
        .await?
        .ok_or_else(|| CareError::not_found(format!("Doctor with ID {} not found", doctor_id)))?;

    if state.store.find_availability(doctor_id, date).await?.is_some() {
        return Err(shift_conflict());
    }

    // A concurrent insert for the same day loses on the unique constraint
    let record = state
        .store
        .insert_availability(doctor_id, date, slots)
        .await?
        .ok_or_else(shift_conflict)?;

    info!(
        "Shift created: doctor={}, date={}, slots={}",
        doctor_id,
        record.date,
        record.slots.len()
    );
    Ok(record)
}

fn shift_conflict() -> CareError {
    CareError::Conflict(
        "A shift is already scheduled for this date. Cancel the existing shift first.".to_string(),
    )
}

/// Renders a freshly created record with full local timestamps and slot ids.
pub fn render_created(state: &ApiState, record: &AvailabilityRecord) -> AvailabilityResponse {
    AvailabilityResponse {
        date: state.clock.format_date(record.date),
        owner: record.owner.to_string(),
        slots: record
            .slots
            .iter()
            .map(|slot| SlotView {
                id: slot.id.to_string(),
                start_time: state.clock.format_timestamp(slot.start_time),
                end_time: state.clock.format_timestamp(slot.end_time),
                is_booked: slot.is_booked,
            })
            .collect(),
    }
}

/// Lists a doctor's shifts day by day.
///
/// Students only see open slots; the doctor's own view keeps booked slots
/// along with their flag. Nothing about who booked a slot is exposed.
pub async fn list_availability(
    state: &ApiState,
    doctor_id: Uuid,
    for_student: bool,
) -> CareResult<Vec<DayAvailability>> {
    let records = state.store.availability_for_doctor(doctor_id).await?;
    if records.is_empty() {
        return Err(CareError::not_found("No availability found for this doctor"));
    }

    let days = records
        .iter()
        .map(|record| DayAvailability {
            date: state.clock.format_date(record.date),
            slots: record
                .slots
                .iter()
                .filter(|slot| !(for_student && slot.is_booked))
                .map(|slot| SlotTimes {
                    start_time: state.clock.format_time(slot.start_time),
                    end_time: state.clock.format_time(slot.end_time),
                    is_booked: slot.is_booked,
                })
                .collect(),
        })
        .collect();

    Ok(days)
}

/// One `(date, earliest start, latest end)` entry per shift, for calendar highlighting.
///
/// Duplicates are removed by comparing whole entries, not dates alone, so
/// two differing windows on one date would both be listed.
pub async fn list_shift_dates(state: &ApiState, doctor_id: Uuid) -> CareResult<Vec<ShiftDate>> {
    let records = state.store.availability_for_doctor(doctor_id).await?;
    if records.is_empty() {
        return Err(CareError::not_found("No dates found for this doctor"));
    }

    let mut seen = HashSet::new();
    let mut dates = Vec::with_capacity(records.len());
    for record in &records {
        let earliest = record.slots.iter().map(|s| s.start_time).min();
        let latest = record.slots.iter().map(|s| s.end_time).max();
        let (Some(earliest), Some(latest)) = (earliest, latest) else {
            continue;
        };

        let entry = ShiftDate {
            date: state.clock.format_date(record.date),
            start_time: state.clock.format_time(earliest),
            end_time: state.clock.format_time(latest),
        };
        if seen.insert(entry.clone()) {
            dates.push(entry);
        }
    }

    Ok(dates)
}

/// Cancels the doctor's shift on the requested date, removing its appointments.
///
/// # Errors
///
/// * `CareError::Validation` - date missing or malformed
/// * `CareError::NotFound` - no shift on that date
pub async fn cancel_shift(
    state: &ApiState,
    doctor_id: Uuid,
    request: &CancelShiftRequest,
) -> CareResult<CancelShiftResponse> {
    let date = state.clock.parse_date(required(&request.date, "date")?)?;

    let removed = state
        .store
        .cancel_shift(doctor_id, date)
        .await?
        .ok_or_else(|| CareError::not_found("No shift found for the specified date"))?;

    info!(
        "Shift cancelled: doctor={}, date={}, appointments_removed={}",
        doctor_id, date, removed
    );
    Ok(CancelShiftResponse {
        date: state.clock.format_date(date),
        appointments_removed: removed,
    })
}
