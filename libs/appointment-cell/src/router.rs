// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use shared_database::SharedStore;

use crate::handlers;
use crate::services::AppointmentBookingService;

pub fn appointment_routes(store: SharedStore) -> Router {
    let booking_service = Arc::new(AppointmentBookingService::new(store));

    Router::new()
        .route(
            "/",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route("/conflicts/check", get(handlers::check_conflicts))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route(
            "/{appointment_id}/status",
            patch(handlers::update_appointment_status),
        )
        .with_state(booking_service)
}
