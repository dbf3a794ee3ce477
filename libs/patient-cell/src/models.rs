use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{AppError, ClinicId, PatientProfileId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: PatientProfileId,
    pub user_id: UserId,
    pub clinic_id: Option<ClinicId>,
    pub date_of_birth: Option<NaiveDate>,
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub clinic_id: Option<ClinicId>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_provider: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientQuery {
    pub clinic_id: Option<ClinicId>,
}

#[derive(Error, Debug)]
pub enum PatientError {
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Storage(e) => e.into(),
        }
    }
}
