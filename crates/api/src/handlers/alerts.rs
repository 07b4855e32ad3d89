use axum::{
    extract::{Path, State},
    Extension,
};
use campuscare_core::models::{
    alert::{Alert, AlertRequest},
    auth::Claims,
};
use std::sync::Arc;

use crate::{
    middleware::{
        auth::ensure_subject,
        error_handling::{AppError, AppJson},
    },
    response::ApiResponse,
    services::{alerts, parse_id},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_alert(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<AlertRequest>,
) -> Result<ApiResponse<Alert>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctorId")?;
    ensure_subject(&claims, doctor_id)?;

    let alert = alerts::create_alert(&state, doctor_id, &payload).await?;

    Ok(ApiResponse::created(alert, "Alert created successfully"))
}

#[axum::debug_handler]
pub async fn list_alerts(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<Vec<Alert>>, AppError> {
    let alerts = alerts::list_alerts(&state).await?;

    Ok(ApiResponse::ok(alerts, "Alerts fetched successfully"))
}

#[axum::debug_handler]
pub async fn edit_alert(
    State(state): State<Arc<ApiState>>,
    Path(alert_id): Path<String>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<AlertRequest>,
) -> Result<ApiResponse<Alert>, AppError> {
    let alert_id = parse_id(&alert_id, "alertId")?;
    let alert = alerts::edit_alert(&state, alert_id, claims.sub, &payload).await?;

    Ok(ApiResponse::ok(alert, "Alert updated successfully"))
}

#[axum::debug_handler]
pub async fn delete_alert(
    State(state): State<Arc<ApiState>>,
    Path(alert_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<ApiResponse<Option<()>>, AppError> {
    let alert_id = parse_id(&alert_id, "alertId")?;
    alerts::delete_alert(&state, alert_id, claims.sub).await?;

    Ok(ApiResponse::ok(None, "Alert deleted successfully"))
}
