// =====================================================================================
// MONITORING MODELS
// =====================================================================================

use serde::Serialize;

use shared_database::StoreDiagnostics;

pub const SERVICE_NAME: &str = "doctor-booking";

#[derive(Debug, Clone, Serialize)]
pub struct LivenessResponse {
    pub service: &'static str,
    pub status: &'static str,
}

/// Body of `GET /test`. `status` is `ok` only when the store answered.
#[derive(Debug, Clone, Serialize)]
pub struct StoreDiagnosticsResponse {
    pub status: &'static str,
    pub store: StoreDiagnostics,
}
