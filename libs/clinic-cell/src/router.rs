use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::SharedStore;

use crate::handlers;
use crate::services::{ClinicService, UserService};

pub fn clinic_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_clinics).post(handlers::create_clinic))
        .with_state(Arc::new(ClinicService::new(store)))
}

pub fn user_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .with_state(Arc::new(UserService::new(store)))
}
