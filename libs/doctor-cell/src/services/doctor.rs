use tracing::{debug, info};

use shared_database::{create_record, list_records, Collection, Filter, SharedStore};
use shared_models::DoctorProfileId;
use shared_utils::validation::require_non_blank;

use crate::models::{CreateDoctorRequest, DoctorError, DoctorProfile, DoctorQuery};

pub struct DoctorService {
    store: SharedStore,
}

impl DoctorService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn create_doctor(
        &self,
        request: CreateDoctorRequest,
    ) -> Result<DoctorProfileId, DoctorError> {
        require_non_blank("specialty", &request.specialty)?;

        let id = create_record(self.store.as_ref(), Collection::DoctorProfile, &request).await?;
        info!(
            "Doctor profile {} created for user {} at clinic {}",
            id, request.user_id, request.clinic_id
        );

        Ok(DoctorProfileId::new(id))
    }

    pub async fn list_doctors(&self, query: DoctorQuery) -> Result<Vec<DoctorProfile>, DoctorError> {
        debug!("Listing doctor profiles with {:?}", query);
        let filter = Filter::from_query(&query)?;
        Ok(list_records(self.store.as_ref(), Collection::DoctorProfile, &filter).await?)
    }
}
