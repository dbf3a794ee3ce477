// libs/appointment-cell/src/services/booking.rs
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use shared_database::{
    create_record, find_record, list_records, update_record, Collection, Filter, SharedStore,
};
use shared_models::{AppointmentId, DoctorId};

use crate::models::{
    Appointment, AppointmentError, AppointmentQuery, AppointmentStatus, BookAppointmentRequest,
    ConflictCheckResponse, NewAppointment,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::locks::DoctorLocks;

pub struct AppointmentBookingService {
    store: SharedStore,
    conflict_service: ConflictDetectionService,
    lifecycle_service: AppointmentLifecycleService,
    doctor_locks: DoctorLocks,
}

impl AppointmentBookingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            conflict_service: ConflictDetectionService::new(store.clone()),
            lifecycle_service: AppointmentLifecycleService::new(),
            doctor_locks: DoctorLocks::new(),
            store,
        }
    }

    /// Book an appointment. The conflict check and the insert run under the
    /// doctor's lock so two overlapping bookings can never both be stored.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<AppointmentId, AppointmentError> {
        debug!(
            "Booking appointment for patient {} with doctor {} at {}",
            request.patient_id, request.doctor_id, request.start_datetime
        );

        validate_interval(request.start_datetime, request.end_datetime)?;

        let status = request.status.unwrap_or(AppointmentStatus::Pending);
        if !status.is_active() {
            return Err(AppointmentError::Validation(format!(
                "New appointments must be pending or confirmed, got {}",
                status
            )));
        }

        let _guard = self.doctor_locks.acquire(&request.doctor_id).await;

        let conflicts = self
            .conflict_service
            .check_conflicts(
                &request.doctor_id,
                request.start_datetime,
                request.end_datetime,
                None,
            )
            .await?;

        if conflicts.has_conflict {
            warn!(
                "Booking rejected for doctor {}: slot {} - {} is taken",
                request.doctor_id, request.start_datetime, request.end_datetime
            );
            return Err(AppointmentError::SlotConflict);
        }

        let appointment = NewAppointment {
            clinic_id: request.clinic_id,
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            start_datetime: request.start_datetime,
            end_datetime: request.end_datetime,
            status,
            notes: request.notes,
        };

        let id = create_record(self.store.as_ref(), Collection::Appointment, &appointment).await?;
        info!(
            "Appointment {} booked for doctor {} ({})",
            id, appointment.doctor_id, status
        );

        Ok(AppointmentId::new(id))
    }

    pub async fn list_appointments(
        &self,
        query: AppointmentQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments with {:?}", query);
        let filter = Filter::from_query(&query)?;
        Ok(list_records(self.store.as_ref(), Collection::Appointment, &filter).await?)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Appointment, AppointmentError> {
        find_record(
            self.store.as_ref(),
            Collection::Appointment,
            appointment_id.as_str(),
        )
        .await?
        .ok_or_else(|| AppointmentError::NotFound(appointment_id.clone()))
    }

    /// Move an appointment along its lifecycle. The current status is re-read
    /// under the doctor's lock, so a concurrent booking or transition for the
    /// same doctor cannot interleave with the check.
    pub async fn update_status(
        &self,
        appointment_id: &AppointmentId,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let doctor_id = self.get_appointment(appointment_id).await?.doctor_id;
        let _guard = self.doctor_locks.acquire(&doctor_id).await;

        let current = self.get_appointment(appointment_id).await?;
        self.lifecycle_service
            .validate_status_transition(current.status, new_status)?;

        let changes = json!({
            "status": new_status,
            "updated_at": Utc::now(),
        });

        let updated: Appointment = update_record(
            self.store.as_ref(),
            Collection::Appointment,
            appointment_id.as_str(),
            changes,
        )
        .await?
        .ok_or_else(|| AppointmentError::NotFound(appointment_id.clone()))?;

        info!(
            "Appointment {} moved from {} to {}",
            appointment_id, current.status, updated.status
        );

        Ok(updated)
    }

    pub async fn check_conflicts(
        &self,
        doctor_id: &DoctorId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_appointment_id: Option<&AppointmentId>,
    ) -> Result<ConflictCheckResponse, AppointmentError> {
        validate_interval(start_time, end_time)?;
        self.conflict_service
            .check_conflicts(doctor_id, start_time, end_time, exclude_appointment_id)
            .await
    }
}

fn validate_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppointmentError> {
    if start >= end {
        return Err(AppointmentError::Validation(format!(
            "start_datetime {} must be before end_datetime {}",
            start, end
        )));
    }
    Ok(())
}
