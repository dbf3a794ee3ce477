use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::SharedStore;

use crate::handlers;
use crate::services::{AvailabilityService, DoctorService};

pub fn doctor_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .with_state(Arc::new(DoctorService::new(store)))
}

pub fn availability_routes(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_availabilities).post(handlers::create_availability),
        )
        .with_state(Arc::new(AvailabilityService::new(store)))
}
