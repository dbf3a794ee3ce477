use std::sync::Arc;
use axum::{routing::get, Router};
use shared_database::SharedStore;

use crate::handlers::*;
use crate::services::PatientService;

pub fn patient_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_patients).post(create_patient))
        .with_state(Arc::new(PatientService::new(store)))
}
