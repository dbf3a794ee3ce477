// =====================================================================================
// HEALTH MONITORING SERVICE
// =====================================================================================

use tracing::{debug, warn};

use shared_database::SharedStore;

use crate::models::{LivenessResponse, StoreDiagnosticsResponse, SERVICE_NAME};

pub struct HealthMonitorService {
    store: SharedStore,
}

impl HealthMonitorService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn liveness(&self) -> LivenessResponse {
        LivenessResponse {
            service: SERVICE_NAME,
            status: "ok",
        }
    }

    /// Probes the store. Never fails: an unreachable store is reported in the
    /// body rather than as an error status.
    pub async fn store_diagnostics(&self) -> StoreDiagnosticsResponse {
        let store = self.store.diagnostics().await;
        debug!("Store diagnostics: {:?}", store);

        let status = if store.connected {
            "ok"
        } else {
            warn!(
                "Store backend {} is not reachable: {}",
                store.backend,
                store.error.as_deref().unwrap_or("no collections answered")
            );
            "degraded"
        };

        StoreDiagnosticsResponse { status, store }
    }
}
