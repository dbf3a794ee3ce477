use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{DateTime, Utc};

use appointment_cell::{
    AppointmentBookingService, AppointmentError, AppointmentStatus, BookAppointmentRequest,
};
use shared_models::{ClinicId, DoctorId, PatientId};
use shared_utils::test_utils::{at, memory_store};

fn booking(doctor: &str, patient: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> BookAppointmentRequest {
    BookAppointmentRequest {
        clinic_id: ClinicId::new("clinic-1"),
        doctor_id: DoctorId::new(doctor),
        patient_id: PatientId::new(patient),
        start_datetime: start,
        end_datetime: end,
        status: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_back_to_back_slots_do_not_conflict() {
    let service = AppointmentBookingService::new(memory_store());

    service
        .book_appointment(booking("doc-1", "p-1", at(9, 0), at(9, 30)))
        .await
        .unwrap();
    service
        .book_appointment(booking("doc-1", "p-2", at(9, 30), at(10, 0)))
        .await
        .unwrap();
    service
        .book_appointment(booking("doc-1", "p-3", at(8, 30), at(9, 0)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_identical_slot_is_rejected() {
    let service = AppointmentBookingService::new(memory_store());

    service
        .book_appointment(booking("doc-1", "p-1", at(9, 0), at(9, 30)))
        .await
        .unwrap();
    let second = service
        .book_appointment(booking("doc-1", "p-2", at(9, 0), at(9, 30)))
        .await;

    assert_matches!(second, Err(AppointmentError::SlotConflict));
}

#[tokio::test]
async fn test_terminal_appointments_free_the_slot() {
    let service = AppointmentBookingService::new(memory_store());

    let cancelled = service
        .book_appointment(booking("doc-1", "p-1", at(9, 0), at(9, 30)))
        .await
        .unwrap();
    service
        .update_status(&cancelled, AppointmentStatus::Cancelled)
        .await
        .unwrap();

    let completed = service
        .book_appointment(booking("doc-1", "p-2", at(9, 0), at(9, 30)))
        .await
        .unwrap();
    service
        .update_status(&completed, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    service
        .update_status(&completed, AppointmentStatus::Completed)
        .await
        .unwrap();

    service
        .book_appointment(booking("doc-1", "p-3", at(9, 0), at(9, 30)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_confirmed_appointment_blocks_the_slot() {
    let service = AppointmentBookingService::new(memory_store());

    let id = service
        .book_appointment(booking("doc-1", "p-1", at(9, 0), at(10, 0)))
        .await
        .unwrap();
    service
        .update_status(&id, AppointmentStatus::Confirmed)
        .await
        .unwrap();

    let identical = service
        .book_appointment(booking("doc-1", "p-2", at(9, 0), at(10, 0)))
        .await;
    assert_matches!(identical, Err(AppointmentError::SlotConflict));

    let overlapping = service
        .book_appointment(booking("doc-1", "p-3", at(9, 45), at(10, 15)))
        .await;
    assert_matches!(overlapping, Err(AppointmentError::SlotConflict));

    let checked = service
        .check_conflicts(&DoctorId::new("doc-1"), at(9, 30), at(9, 45), None)
        .await
        .unwrap();
    assert!(checked.has_conflict);
    assert_eq!(checked.conflicting_appointments[0].status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn test_other_doctors_are_independent() {
    let service = AppointmentBookingService::new(memory_store());

    service
        .book_appointment(booking("doc-1", "p-1", at(9, 0), at(10, 0)))
        .await
        .unwrap();
    service
        .book_appointment(booking("doc-2", "p-1", at(9, 0), at(10, 0)))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_bookings_admit_exactly_one() {
    let service = Arc::new(AppointmentBookingService::new(memory_store()));

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .book_appointment(booking("doc-1", &format!("p-{}", i), at(14, 0), at(14, 30)))
                    .await
            })
        })
        .collect();

    let mut booked = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(AppointmentError::SlotConflict) => conflicts += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, 49);

    let checked = service
        .check_conflicts(&DoctorId::new("doc-1"), at(14, 0), at(14, 30), None)
        .await
        .unwrap();
    assert_eq!(checked.conflicting_appointments.len(), 1);
}

#[tokio::test]
async fn test_lifecycle_walk() {
    let service = AppointmentBookingService::new(memory_store());
    let id = service
        .book_appointment(booking("doc-1", "p-1", at(11, 0), at(11, 30)))
        .await
        .unwrap();

    let confirmed = service
        .update_status(&id, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert!(confirmed.updated_at.is_some());

    let completed = service
        .update_status(&id, AppointmentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    for next in [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
    ] {
        assert_matches!(
            service.update_status(&id, next).await,
            Err(AppointmentError::InvalidTransition { .. })
        );
    }
}

#[tokio::test]
async fn test_conflict_check_can_exclude_an_appointment() {
    let service = AppointmentBookingService::new(memory_store());
    let id = service
        .book_appointment(booking("doc-1", "p-1", at(15, 0), at(16, 0)))
        .await
        .unwrap();

    let with_self = service
        .check_conflicts(&DoctorId::new("doc-1"), at(15, 30), at(16, 30), None)
        .await
        .unwrap();
    assert!(with_self.has_conflict);
    assert_eq!(with_self.conflicting_appointments[0].id, id);

    let without_self = service
        .check_conflicts(&DoctorId::new("doc-1"), at(15, 30), at(16, 30), Some(&id))
        .await
        .unwrap();
    assert!(!without_self.has_conflict);
}
