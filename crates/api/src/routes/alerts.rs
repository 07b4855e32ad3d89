use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::alerts,
    middleware::auth::{require_doctor, require_member},
    ApiState,
};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let doctor = || from_fn_with_state(state.clone(), require_doctor);

    Router::new()
        .route(
            "/api/v1/alerts/doctors/:doctor_id/alert",
            post(alerts::create_alert).route_layer(doctor()),
        )
        .route(
            "/api/v1/alerts",
            get(alerts::list_alerts)
                .route_layer(from_fn_with_state(state.clone(), require_member)),
        )
        .route(
            "/api/v1/alerts/:alert_id",
            put(alerts::edit_alert).route_layer(doctor()),
        )
        .route(
            "/api/v1/alerts/:alert_id",
            delete(alerts::delete_alert).route_layer(doctor()),
        )
}
