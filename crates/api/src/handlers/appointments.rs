use axum::{
    extract::{Path, State},
    Extension,
};
use campuscare_core::models::{
    appointment::{AppointmentDetail, BookSlotRequest, BookSlotResponse},
    auth::Claims,
    availability::{
        AvailabilityResponse, CancelShiftRequest, CancelShiftResponse, CreateAvailabilityRequest,
        DayAvailability, ShiftDate,
    },
};
use std::sync::Arc;

use crate::{
    middleware::{
        auth::ensure_subject,
        error_handling::{AppError, AppJson},
    },
    response::ApiResponse,
    services::{availability, booking, parse_id, required},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CreateAvailabilityRequest>,
) -> Result<ApiResponse<AvailabilityResponse>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let record = availability::create_availability(&state, doctor_id, &payload).await?;

    Ok(ApiResponse::created(
        availability::render_created(&state, &record),
        "Availability created successfully",
    ))
}

/// Open slots a student may still book
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
) -> Result<ApiResponse<Vec<DayAvailability>>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    let days = availability::list_availability(&state, doctor_id, true).await?;

    Ok(ApiResponse::ok(days, "Availability fetched successfully"))
}

/// The doctor's own view: every slot with its booked flag
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Vec<DayAvailability>>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let days = availability::list_availability(&state, doctor_id, false).await?;

    Ok(ApiResponse::ok(days, "Availability fetched successfully"))
}

#[axum::debug_handler]
pub async fn get_shift_dates(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Vec<ShiftDate>>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let dates = availability::list_shift_dates(&state, doctor_id).await?;

    Ok(ApiResponse::ok(dates, "Dates fetched successfully"))
}

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<BookSlotRequest>,
) -> Result<ApiResponse<BookSlotResponse>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    // Students book for themselves only
    let student_id = parse_id(required(&payload.student_id, "studentId")?, "studentId")?;
    ensure_subject(&claims, student_id)?;

    let appointment = booking::book_slot(&state, doctor_id, &payload).await?;

    Ok(ApiResponse::created(
        booking::render_booking(&state, &appointment),
        "Appointment booked successfully",
    ))
}

#[axum::debug_handler]
pub async fn cancel_shift(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CancelShiftRequest>,
) -> Result<ApiResponse<CancelShiftResponse>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let cancelled = availability::cancel_shift(&state, doctor_id, &payload).await?;

    Ok(ApiResponse::ok(cancelled, "Shift cancelled successfully"))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Vec<AppointmentDetail>>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let appointments = booking::list_appointments(&state, doctor_id).await?;

    Ok(ApiResponse::ok(appointments, "Appointments fetched successfully"))
}
