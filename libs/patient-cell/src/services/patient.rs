use tracing::{debug, info};

use shared_database::{create_record, list_records, Collection, Filter, SharedStore};
use shared_models::PatientProfileId;

use crate::models::{CreatePatientRequest, PatientError, PatientProfile, PatientQuery};

pub struct PatientService {
    store: SharedStore,
}

impl PatientService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<PatientProfileId, PatientError> {
        debug!("Creating patient profile for user {}", request.user_id);

        let id = create_record(self.store.as_ref(), Collection::PatientProfile, &request).await?;
        info!("Patient profile created successfully with ID: {}", id);

        Ok(PatientProfileId::new(id))
    }

    pub async fn list_patients(&self, query: PatientQuery) -> Result<Vec<PatientProfile>, PatientError> {
        let filter = Filter::from_query(&query)?;
        Ok(list_records(self.store.as_ref(), Collection::PatientProfile, &filter).await?)
    }
}
