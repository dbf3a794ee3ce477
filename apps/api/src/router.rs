use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use appointment_cell::appointment_routes;
use clinic_cell::{clinic_routes, user_routes};
use doctor_cell::{availability_routes, doctor_routes};
use monitoring_cell::monitoring_routes;
use patient_cell::patient_routes;
use shared_config::AppConfig;
use shared_database::{MemoryStore, SharedStore, StoreError, SupabaseStore};

/// Picks the remote store when credentials are present, otherwise an
/// in-process store whose contents are lost on restart.
pub fn build_store(config: &AppConfig) -> Result<SharedStore, StoreError> {
    if config.is_configured() {
        let store = SupabaseStore::new(config)?;
        info!("Using Supabase store at {}", store.get_base_url());
        Ok(Arc::new(store))
    } else {
        warn!("SUPABASE_URL / SUPABASE_SERVICE_KEY not set, falling back to in-memory store");
        Ok(Arc::new(MemoryStore::new()))
    }
}

pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .merge(monitoring_routes(store.clone()))
        .nest("/clinics", clinic_routes(store.clone()))
        .nest("/users", user_routes(store.clone()))
        .nest("/doctors", doctor_routes(store.clone()))
        .nest("/patients", patient_routes(store.clone()))
        .nest("/availabilities", availability_routes(store.clone()))
        .nest("/appointments", appointment_routes(store))
}
