use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use shared_database::{list_records, Collection, Filter, SharedStore};
use shared_models::{AppointmentId, DoctorId};

use crate::models::{Appointment, AppointmentError, AppointmentStatus, ConflictCheckResponse};

/// Half-open interval test: `[start1, end1)` and `[start2, end2)` overlap iff
/// `start1 < end2 && start2 < end1`. Touching endpoints do not overlap.
pub fn appointments_overlap(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 < end2 && start2 < end1
}

pub struct ConflictDetectionService {
    store: SharedStore,
}

impl ConflictDetectionService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Check for active appointments of a doctor overlapping `[start_time, end_time)`.
    pub async fn check_conflicts(
        &self,
        doctor_id: &DoctorId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_appointment_id: Option<&AppointmentId>,
    ) -> Result<ConflictCheckResponse, AppointmentError> {
        debug!(
            "Checking conflicts for doctor {} from {} to {}",
            doctor_id, start_time, end_time
        );

        let conflicting_appointments: Vec<Appointment> = self
            .active_appointments(doctor_id)
            .await?
            .into_iter()
            .filter(|appointment| Some(&appointment.id) != exclude_appointment_id)
            .filter(|appointment| {
                appointments_overlap(
                    start_time,
                    end_time,
                    appointment.start_datetime,
                    appointment.end_datetime,
                )
            })
            .collect();

        let has_conflict = !conflicting_appointments.is_empty();
        if has_conflict {
            warn!(
                "Conflict detected for doctor {} - {} conflicting appointments",
                doctor_id,
                conflicting_appointments.len()
            );
        }

        Ok(ConflictCheckResponse {
            has_conflict,
            conflicting_appointments,
        })
    }

    async fn active_appointments(
        &self,
        doctor_id: &DoctorId,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = Vec::new();

        for status in AppointmentStatus::ACTIVE {
            let filter = Filter::new()
                .eq("doctor_id", doctor_id.as_str())
                .eq("status", status.to_string());
            let batch: Vec<Appointment> =
                list_records(self.store.as_ref(), Collection::Appointment, &filter).await?;
            appointments.extend(batch);
        }

        Ok(appointments)
    }
}
