// =====================================================================================
// MONITORING CELL - LIVENESS & STORE DIAGNOSTICS
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{LivenessResponse, StoreDiagnosticsResponse};
pub use router::monitoring_routes;
pub use services::HealthMonitorService;
