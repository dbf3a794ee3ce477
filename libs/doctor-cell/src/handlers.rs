use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use shared_models::{AppError, IdResponse};

use crate::models::{
    Availability, AvailabilityQuery, CreateAvailabilityRequest, CreateDoctorRequest,
    DoctorProfile, DoctorQuery,
};
use crate::services::{AvailabilityService, DoctorService};

// ==============================================================================
// DOCTOR PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_doctor(
    State(service): State<Arc<DoctorService>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateDoctorRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.create_doctor(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DoctorService>>,
    WithRejection(Query(query), _): WithRejection<Query<DoctorQuery>, AppError>,
) -> Result<Json<Vec<DoctorProfile>>, AppError> {
    Ok(Json(service.list_doctors(query).await?))
}

// ==============================================================================
// AVAILABILITY HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_availability(
    State(service): State<Arc<AvailabilityService>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateAvailabilityRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.create_availability(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_availabilities(
    State(service): State<Arc<AvailabilityService>>,
    WithRejection(Query(query), _): WithRejection<Query<AvailabilityQuery>, AppError>,
) -> Result<Json<Vec<Availability>>, AppError> {
    Ok(Json(service.list_availabilities(query).await?))
}
