//! Medical reports doctors file for students.
//!
//! A student's newest report is the current one: it is what students see
//! first and the only one a doctor may amend. Older reports stay readable
//! as history.

use campuscare_core::{
    errors::{CareError, CareResult},
    models::report::{CreateReportRequest, NewReport, Report, ReportChanges, UpdateReportRequest},
};
use tracing::info;
use uuid::Uuid;

use super::{existing_student, required};
use crate::ApiState;

/// Files a new report, which becomes the student's latest.
///
/// # Errors
///
/// * `CareError::Validation` - a field is blank or `dob` is malformed
/// * `CareError::NotFound` - the student does not exist
pub async fn add_report(
    state: &ApiState,
    doctor_id: Uuid,
    student_id: Uuid,
    request: &CreateReportRequest,
) -> CareResult<Report> {
    let report = NewReport {
        student_id,
        doctor_id,
        name: required(&request.name, "name")?.to_string(),
        dob: state.clock.parse_date(required(&request.dob, "dob")?)?,
        blood_group: required(&request.blood_group, "bloodGroup")?.to_string(),
        medications: required(&request.medications, "medications")?.to_string(),
        allergies: required(&request.allergies, "allergies")?.to_string(),
        diseases: required(&request.diseases, "diseases")?.to_string(),
    };

    existing_student(state, student_id).await?;

    let report = state.store.insert_report(report).await?;
    info!("Report filed: id={}, student={}, doctor={}", report.id, student_id, doctor_id);
    Ok(report)
}

/// All of a student's reports, newest first.
pub async fn list_reports(state: &ApiState, student_id: Uuid) -> CareResult<Vec<Report>> {
    existing_student(state, student_id).await?;

    let reports = state.store.reports_for_student(student_id).await?;
    if reports.is_empty() {
        return Err(no_reports());
    }

    Ok(reports)
}

pub async fn latest_report(state: &ApiState, student_id: Uuid) -> CareResult<Report> {
    existing_student(state, student_id).await?;

    state
        .store
        .latest_report(student_id)
        .await?
        .ok_or_else(no_reports)
}

/// Amends the student's latest report with the fields present in the request.
///
/// Fields that are sent must not be blank, and at least one must be sent.
pub async fn edit_latest_report(
    state: &ApiState,
    student_id: Uuid,
    request: &UpdateReportRequest,
) -> CareResult<Report> {
    let changes = report_changes(state, request)?;

    let latest = latest_report(state, student_id).await?;

    let report = state
        .store
        .update_report(latest.id, changes)
        .await?
        .ok_or_else(no_reports)?;

    info!("Report updated: id={}, student={}", report.id, student_id);
    Ok(report)
}

fn report_changes(state: &ApiState, request: &UpdateReportRequest) -> CareResult<ReportChanges> {
    let text = |value: &Option<String>, field: &str| -> CareResult<Option<String>> {
        value
            .as_deref()
            .map(|raw| required(raw, field).map(str::to_string))
            .transpose()
    };

    let dob = match request.dob.as_deref() {
        Some(raw) => Some(state.clock.parse_date(required(raw, "dob")?)?),
        None => None,
    };

    let changes = ReportChanges {
        name: text(&request.name, "name")?,
        dob,
        blood_group: text(&request.blood_group, "bloodGroup")?,
        medications: text(&request.medications, "medications")?,
        allergies: text(&request.allergies, "allergies")?,
        diseases: text(&request.diseases, "diseases")?,
    };

    if changes.is_empty() {
        return Err(CareError::validation("No report fields to update"));
    }

    Ok(changes)
}

fn no_reports() -> CareError {
    CareError::not_found("No reports found for this student")
}
