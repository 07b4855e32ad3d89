//! Notices posted by doctors. Anyone signed in may read them; only the
//! doctor who posted one may change or remove it.

use campuscare_core::{
    errors::{CareError, CareResult},
    models::alert::{Alert, AlertRequest},
};
use tracing::info;
use uuid::Uuid;

use super::required;
use crate::ApiState;

pub async fn create_alert(
    state: &ApiState,
    doctor_id: Uuid,
    request: &AlertRequest,
) -> CareResult<Alert> {
    let message = required(&request.message, "message")?;

    state
        .store
        .find_doctor(doctor_id)
        .await?
        .ok_or_else(|| CareError::not_found(format!("Doctor with ID {} not found", doctor_id)))?;

    let alert = state.store.insert_alert(doctor_id, message.to_string()).await?;
    info!("Alert created: id={}, doctor={}", alert.id, doctor_id);
    Ok(alert)
}

/// Every alert, newest first.
pub async fn list_alerts(state: &ApiState) -> CareResult<Vec<Alert>> {
    Ok(state.store.list_alerts().await?)
}

async fn owned_alert(state: &ApiState, alert_id: Uuid, doctor_id: Uuid) -> CareResult<Alert> {
    let alert = state
        .store
        .find_alert(alert_id)
        .await?
        .ok_or_else(|| CareError::not_found("Alert not found"))?;

    if alert.owner != doctor_id {
        return Err(CareError::Authorization(
            "Only the doctor who posted this alert can change it".to_string(),
        ));
    }

    Ok(alert)
}

pub async fn edit_alert(
    state: &ApiState,
    alert_id: Uuid,
    doctor_id: Uuid,
    request: &AlertRequest,
) -> CareResult<Alert> {
    let message = required(&request.message, "message")?;
    owned_alert(state, alert_id, doctor_id).await?;

    let alert = state
        .store
        .update_alert(alert_id, message.to_string())
        .await?
        .ok_or_else(|| CareError::not_found("Alert not found"))?;

    info!("Alert updated: id={}", alert_id);
    Ok(alert)
}

pub async fn delete_alert(state: &ApiState, alert_id: Uuid, doctor_id: Uuid) -> CareResult<()> {
    owned_alert(state, alert_id, doctor_id).await?;

    if !state.store.delete_alert(alert_id).await? {
        return Err(CareError::not_found("Alert not found"));
    }

    info!("Alert deleted: id={}", alert_id);
    Ok(())
}
