use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Clinic,
    User,
    DoctorProfile,
    PatientProfile,
    Availability,
    Appointment,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Clinic,
        Collection::User,
        Collection::DoctorProfile,
        Collection::PatientProfile,
        Collection::Availability,
        Collection::Appointment,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Clinic => "clinics",
            Collection::User => "users",
            Collection::DoctorProfile => "doctor_profiles",
            Collection::PatientProfile => "patient_profiles",
            Collection::Availability => "availabilities",
            Collection::Appointment => "appointments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreDiagnostics {
    pub backend: &'static str,
    pub configured: bool,
    pub connected: bool,
    pub collections: Vec<String>,
    pub error: Option<String>,
}

/// Untyped document storage. Records are JSON objects carrying a string `id`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, collection: Collection, document: Value) -> Result<Value, StoreError>;

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Shallow-merges `changes` into the record with the given id.
    /// Returns `None` when no such record exists.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError>;

    async fn diagnostics(&self) -> StoreDiagnostics;
}

pub type SharedStore = Arc<dyn RecordStore>;

/// Assigns a fresh id and `created_at`, stores the record and returns the id.
pub async fn create_record<T>(
    store: &dyn RecordStore,
    collection: Collection,
    record: &T,
) -> Result<String, StoreError>
where
    T: Serialize + ?Sized,
{
    let mut document = match serde_json::to_value(record)? {
        Value::Object(fields) => fields,
        _ => {
            return Err(StoreError::Malformed(format!(
                "{} records must serialize to JSON objects",
                collection
            )))
        }
    };

    let id = Uuid::new_v4().to_string();
    document.insert("id".to_string(), json!(id));
    document.insert("created_at".to_string(), json!(Utc::now()));

    debug!("Creating {} record {}", collection, id);
    store.insert(collection, Value::Object(document)).await?;

    Ok(id)
}

pub async fn list_records<T>(
    store: &dyn RecordStore,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
{
    store
        .find(collection, filter)
        .await?
        .into_iter()
        .map(|document| serde_json::from_value(document).map_err(StoreError::from))
        .collect()
}

pub async fn find_record<T>(
    store: &dyn RecordStore,
    collection: Collection,
    id: &str,
) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    let mut records = store.find(collection, &Filter::by_id(id)).await?;
    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(records.swap_remove(0))?))
}

pub async fn update_record<T>(
    store: &dyn RecordStore,
    collection: Collection,
    id: &str,
    changes: Value,
) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    match store.update(collection, id, changes).await? {
        Some(document) => Ok(Some(serde_json::from_value(document)?)),
        None => Ok(None),
    }
}
