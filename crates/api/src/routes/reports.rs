use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::reports,
    middleware::auth::{require_doctor, require_member},
    ApiState,
};

/// Medical report endpoints. Reads are open to doctors and to the student
/// the reports belong to; writes are doctor-only.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let doctor = || from_fn_with_state(state.clone(), require_doctor);
    let member = || from_fn_with_state(state.clone(), require_member);

    Router::new()
        .route(
            "/api/v1/reports/doctors/:doctor_id/students/:student_id",
            post(reports::add_report).route_layer(doctor()),
        )
        .route(
            "/api/v1/reports/students/:student_id",
            get(reports::list_reports).route_layer(member()),
        )
        .route(
            "/api/v1/reports/students/:student_id/latest",
            get(reports::latest_report).route_layer(member()),
        )
        .route(
            "/api/v1/reports/students/:student_id/latest",
            patch(reports::edit_latest_report).route_layer(doctor()),
        )
}
