use tracing::{debug, info, warn};

use shared_database::{create_record, list_records, Collection, Filter, SharedStore};
use shared_models::AvailabilityId;
use shared_utils::validation::ValidationError;

use crate::models::{Availability, AvailabilityQuery, CreateAvailabilityRequest, DoctorError};

pub struct AvailabilityService {
    store: SharedStore,
}

impl AvailabilityService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Publishes a recurring weekly window. Windows are immutable once stored.
    pub async fn create_availability(
        &self,
        request: CreateAvailabilityRequest,
    ) -> Result<AvailabilityId, DoctorError> {
        if request.start_time >= request.end_time {
            warn!(
                "Rejected availability {}-{} for doctor {}",
                request.start_time, request.end_time, request.doctor_id
            );
            return Err(ValidationError(format!(
                "start_time {} must be before end_time {}",
                request.start_time, request.end_time
            ))
            .into());
        }

        let id = create_record(self.store.as_ref(), Collection::Availability, &request).await?;
        info!(
            "Availability {} published for doctor {} on {} {}-{}",
            id, request.doctor_id, request.weekday, request.start_time, request.end_time
        );

        Ok(AvailabilityId::new(id))
    }

    pub async fn list_availabilities(
        &self,
        query: AvailabilityQuery,
    ) -> Result<Vec<Availability>, DoctorError> {
        debug!("Listing availabilities with {:?}", query);
        let filter = Filter::from_query(&query)?;
        Ok(list_records(self.store.as_ref(), Collection::Availability, &filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeOfDay, Weekday};
    use assert_matches::assert_matches;
    use shared_models::{ClinicId, DoctorId};
    use shared_utils::test_utils::memory_store;

    fn window(start: &str, end: &str) -> CreateAvailabilityRequest {
        CreateAvailabilityRequest {
            doctor_id: DoctorId::new("doc-1"),
            clinic_id: ClinicId::new("clinic-1"),
            weekday: Weekday::try_from(2).unwrap(),
            start_time: TimeOfDay::parse(start).unwrap(),
            end_time: TimeOfDay::parse(end).unwrap(),
        }
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let service = AvailabilityService::new(memory_store());

        let result = service.create_availability(window("17:00", "09:00")).await;
        assert_matches!(result, Err(DoctorError::Validation(_)));

        let empty = service.create_availability(window("09:00", "09:00")).await;
        assert_matches!(empty, Err(DoctorError::Validation(_)));
    }

    #[tokio::test]
    async fn stored_window_keeps_hh_mm_format() {
        let service = AvailabilityService::new(memory_store());
        service
            .create_availability(window("08:15", "12:45"))
            .await
            .unwrap();

        let windows = service
            .list_availabilities(AvailabilityQuery::default())
            .await
            .unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start_time.to_string(), "08:15");
        assert_eq!(u8::from(windows[0].weekday), 2);
    }
}
