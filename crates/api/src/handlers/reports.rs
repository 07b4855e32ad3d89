use axum::{
    extract::{Path, State},
    Extension,
};
use campuscare_core::models::{
    auth::Claims,
    report::{CreateReportRequest, Report, UpdateReportRequest},
};
use std::sync::Arc;

use crate::{
    middleware::{
        auth::{ensure_record_reader, ensure_subject},
        error_handling::{AppError, AppJson},
    },
    response::ApiResponse,
    services::{parse_id, reports},
    ApiState,
};

#[axum::debug_handler]
pub async fn add_report(
    State(state): State<Arc<ApiState>>,
    Path((doctor_id, student_id)): Path<(String, String)>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<CreateReportRequest>,
) -> Result<ApiResponse<Report>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    let student_id = parse_id(&student_id, "studentId")?;
    ensure_subject(&claims, doctor_id)?;

    let report = reports::add_report(&state, doctor_id, student_id, &payload).await?;

    Ok(ApiResponse::created(report, "Report added successfully"))
}

#[axum::debug_handler]
pub async fn list_reports(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Vec<Report>>, AppError> {
    let student_id = parse_id(&student_id, "studentId")?;
    ensure_record_reader(&claims, student_id)?;

    let reports = reports::list_reports(&state, student_id).await?;

    Ok(ApiResponse::ok(reports, "All reports retrieved successfully"))
}

#[axum::debug_handler]
pub async fn latest_report(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Report>, AppError> {
    let student_id = parse_id(&student_id, "studentId")?;
    ensure_record_reader(&claims, student_id)?;

    let report = reports::latest_report(&state, student_id).await?;

    Ok(ApiResponse::ok(report, "Latest report retrieved successfully"))
}

#[axum::debug_handler]
pub async fn edit_latest_report(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<String>,
    AppJson(payload): AppJson<UpdateReportRequest>,
) -> Result<ApiResponse<Report>, AppError> {
    let student_id = parse_id(&student_id, "studentId")?;

    let report = reports::edit_latest_report(&state, student_id, &payload).await?;

    Ok(ApiResponse::ok(report, "Latest report updated successfully"))
}
