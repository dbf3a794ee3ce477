// =====================================================================================
// MONITORING CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::models::{LivenessResponse, StoreDiagnosticsResponse};
use crate::services::HealthMonitorService;

#[axum::debug_handler]
pub async fn liveness(
    State(service): State<Arc<HealthMonitorService>>,
) -> Json<LivenessResponse> {
    Json(service.liveness())
}

#[axum::debug_handler]
pub async fn store_diagnostics(
    State(service): State<Arc<HealthMonitorService>>,
) -> Json<StoreDiagnosticsResponse> {
    Json(service.store_diagnostics().await)
}
