use campuscare_core::{
    errors::{CareError, CareResult},
    models::directory::DoctorSummary,
};

use super::required;
use crate::ApiState;

/// Doctors listed under exactly this speciality.
pub async fn doctors_by_speciality(
    state: &ApiState,
    speciality: Option<&str>,
) -> CareResult<Vec<DoctorSummary>> {
    let speciality = required(speciality.unwrap_or_default(), "speciality")?;

    let doctors = state
        .store
        .doctors_by_speciality(speciality.to_string())
        .await?;
    if doctors.is_empty() {
        return Err(CareError::not_found(format!("{} doctors not found", speciality)));
    }

    Ok(doctors.into_iter().map(Into::into).collect())
}
