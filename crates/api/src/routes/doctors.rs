use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;

use crate::{handlers::directory, middleware::auth::require_student, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/v1/doctors",
        get(directory::list_doctors).route_layer(from_fn_with_state(state, require_student)),
    )
}
