use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use shared_models::{AppError, IdResponse};

use crate::models::{CreatePatientRequest, PatientProfile, PatientQuery};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    WithRejection(Json(request), _): WithRejection<Json<CreatePatientRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.create_patient(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(service): State<Arc<PatientService>>,
    WithRejection(Query(query), _): WithRejection<Query<PatientQuery>, AppError>,
) -> Result<Json<Vec<PatientProfile>>, AppError> {
    Ok(Json(service.list_patients(query).await?))
}
