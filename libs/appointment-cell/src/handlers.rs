// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::debug;

use shared_models::{AppError, AppointmentId, IdResponse};

use crate::models::{
    Appointment, AppointmentQuery, BookAppointmentRequest, ConflictCheckQuery,
    ConflictCheckResponse, StatusUpdateResponse, UpdateStatusRequest,
};
use crate::services::AppointmentBookingService;

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    WithRejection(Json(request), _): WithRejection<Json<BookAppointmentRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.book_appointment(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
    WithRejection(Query(query), _): WithRejection<Query<AppointmentQuery>, AppError>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    Ok(Json(service.list_appointments(query).await?))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    WithRejection(Path(appointment_id), _): WithRejection<Path<AppointmentId>, AppError>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(service.get_appointment(&appointment_id).await?))
}

// ==============================================================================
// LIFECYCLE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(service): State<Arc<AppointmentBookingService>>,
    WithRejection(Path(appointment_id), _): WithRejection<Path<AppointmentId>, AppError>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateStatusRequest>, AppError>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    debug!("Status update for appointment {} to {}", appointment_id, request.status);

    let updated = service
        .update_status(&appointment_id, request.status)
        .await?;

    Ok(Json(StatusUpdateResponse {
        message: format!("Appointment status updated to {}", updated.status),
        id: updated.id,
        status: updated.status,
    }))
}

// ==============================================================================
// CONFLICT CHECK HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn check_conflicts(
    State(service): State<Arc<AppointmentBookingService>>,
    WithRejection(Query(query), _): WithRejection<Query<ConflictCheckQuery>, AppError>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let response = service
        .check_conflicts(
            &query.doctor_id,
            query.start,
            query.end,
            query.exclude_appointment_id.as_ref(),
        )
        .await?;
    Ok(Json(response))
}
