// =====================================================================================
// MONITORING CELL ROUTER
// =====================================================================================

use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::SharedStore;

use crate::handlers;
use crate::services::HealthMonitorService;

pub fn monitoring_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/test", get(handlers::store_diagnostics))
        .with_state(Arc::new(HealthMonitorService::new(store)))
}
