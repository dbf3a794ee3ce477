use tracing::{debug, info};

use shared_database::{create_record, list_records, Collection, Filter, SharedStore};
use shared_models::ClinicId;
use shared_utils::validation::require_non_blank;

use crate::models::{Clinic, ClinicError, CreateClinicRequest};

pub struct ClinicService {
    store: SharedStore,
}

impl ClinicService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn create_clinic(&self, request: CreateClinicRequest) -> Result<ClinicId, ClinicError> {
        require_non_blank("name", &request.name)?;

        let id = create_record(self.store.as_ref(), Collection::Clinic, &request).await?;
        info!("Clinic '{}' registered with id {}", request.name, id);

        Ok(ClinicId::new(id))
    }

    pub async fn list_clinics(&self) -> Result<Vec<Clinic>, ClinicError> {
        debug!("Listing clinics");
        Ok(list_records(self.store.as_ref(), Collection::Clinic, &Filter::new()).await?)
    }
}
