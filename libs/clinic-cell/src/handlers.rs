use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use shared_models::{AppError, IdResponse};

use crate::models::{Clinic, CreateClinicRequest, CreateUserRequest, User, UserQuery};
use crate::services::{ClinicService, UserService};

#[axum::debug_handler]
pub async fn create_clinic(
    State(service): State<Arc<ClinicService>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateClinicRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.create_clinic(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_clinics(
    State(service): State<Arc<ClinicService>>,
) -> Result<Json<Vec<Clinic>>, AppError> {
    Ok(Json(service.list_clinics().await?))
}

#[axum::debug_handler]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    WithRejection(Json(request), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> Result<Json<IdResponse>, AppError> {
    let id = service.create_user(request).await?;
    Ok(Json(IdResponse::new(id.into_inner())))
}

#[axum::debug_handler]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    WithRejection(Query(query), _): WithRejection<Query<UserQuery>, AppError>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(service.list_users(query).await?))
}
