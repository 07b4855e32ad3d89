use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::appointments,
    middleware::auth::{require_doctor, require_student},
    ApiState,
};

/// Shift, slot and appointment endpoints.
///
/// One path may serve both roles: `GET .../availability` is the student
/// view while `POST` on the same path publishes a shift.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let doctor = || from_fn_with_state(state.clone(), require_doctor);
    let student = || from_fn_with_state(state.clone(), require_student);

    Router::new()
        .route(
            "/api/v1/appointments/doctors/:doctor_id/availability",
            post(appointments::create_availability).route_layer(doctor()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/availability",
            get(appointments::get_availability).route_layer(student()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/schedule",
            get(appointments::get_schedule).route_layer(doctor()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/dates",
            get(appointments::get_shift_dates).route_layer(doctor()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/book",
            post(appointments::book_slot).route_layer(student()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/cancel-shift",
            delete(appointments::cancel_shift).route_layer(doctor()),
        )
        .route(
            "/api/v1/appointments/doctors/:doctor_id/appointments",
            get(appointments::list_appointments).route_layer(doctor()),
        )
}
