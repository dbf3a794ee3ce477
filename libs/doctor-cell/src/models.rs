use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{AppError, AvailabilityId, ClinicId, DoctorId, DoctorProfileId, UserId};
use shared_utils::validation::ValidationError;

// ==============================================================================
// DOCTOR PROFILE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: DoctorProfileId,
    pub user_id: UserId,
    pub clinic_id: ClinicId,
    pub specialty: String,
    pub bio: Option<String>,
    pub experience_years: Option<u32>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub user_id: UserId,
    pub clinic_id: ClinicId,
    pub specialty: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorQuery {
    pub clinic_id: Option<ClinicId>,
}

// ==============================================================================
// AVAILABILITY MODELS
// ==============================================================================

/// Day of the week, 0 = Monday through 6 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub fn as_chrono(&self) -> chrono::Weekday {
        match self.0 {
            0 => chrono::Weekday::Mon,
            1 => chrono::Weekday::Tue,
            2 => chrono::Weekday::Wed,
            3 => chrono::Weekday::Thu,
            4 => chrono::Weekday::Fri,
            5 => chrono::Weekday::Sat,
            _ => chrono::Weekday::Sun,
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 6 {
            Ok(Self(value))
        } else {
            Err(format!("weekday must be between 0 (Monday) and 6 (Sunday), got {}", value))
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.0
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_chrono())
    }
}

/// Wall-clock time written as `HH:MM` (24h). `HH:MM:SS` is accepted on input
/// because SQL `time` columns come back in that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(Self)
            .map_err(|_| ValidationError(format!("'{}' is not a valid HH:MM time", value)))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub doctor_id: DoctorId,
    pub clinic_id: ClinicId,
    pub weekday: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub doctor_id: DoctorId,
    pub clinic_id: ClinicId,
    pub weekday: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_id: Option<DoctorId>,
    pub clinic_id: Option<ClinicId>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::Validation(e) => AppError::ValidationError(e.to_string()),
            DoctorError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weekday_accepts_only_zero_through_six() {
        let monday: Weekday = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(monday.as_chrono(), chrono::Weekday::Mon);

        let sunday: Weekday = serde_json::from_value(json!(6)).unwrap();
        assert_eq!(sunday.to_string(), "Sun");

        assert!(serde_json::from_value::<Weekday>(json!(7)).is_err());
        assert!(serde_json::from_value::<Weekday>(json!(-1)).is_err());
    }

    #[test]
    fn time_of_day_round_trips_as_hh_mm() {
        let time: TimeOfDay = serde_json::from_value(json!("09:30")).unwrap();
        assert_eq!(serde_json::to_value(time).unwrap(), json!("09:30"));

        let from_sql: TimeOfDay = serde_json::from_value(json!("17:00:00")).unwrap();
        assert_eq!(from_sql.to_string(), "17:00");
    }

    #[test]
    fn malformed_times_are_rejected() {
        for bad in ["24:00", "9h30", "", "12:60"] {
            assert!(TimeOfDay::parse(bad).is_err(), "{}", bad);
        }
    }
}
