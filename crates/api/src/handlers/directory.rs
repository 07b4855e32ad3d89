use axum::extract::{Query, State};
use campuscare_core::models::directory::{DoctorQuery, DoctorSummary};
use std::sync::Arc;

use crate::{
    middleware::error_handling::AppError, response::ApiResponse, services::directory, ApiState,
};

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DoctorQuery>,
) -> Result<ApiResponse<Vec<DoctorSummary>>, AppError> {
    let doctors = directory::doctors_by_speciality(&state, query.speciality.as_deref()).await?;

    Ok(ApiResponse::ok(doctors, "Doctors fetched successfully"))
}
