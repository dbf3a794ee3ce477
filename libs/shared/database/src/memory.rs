use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::{Collection, RecordStore, StoreDiagnostics};

/// In-process store. Records keep insertion order within a collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Value) -> Result<Value, StoreError> {
        if !document.is_object() {
            return Err(StoreError::Malformed(format!(
                "{} records must be JSON objects",
                collection
            )));
        }

        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let records = collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| filter.matches(record))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        debug!("Found {} {} records", records.len(), collection);
        Ok(records)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        let Value::Object(changes) = changes else {
            return Err(StoreError::Malformed("update changes must be a JSON object".into()));
        };

        let mut collections = self.collections.write().await;
        let Some(record) = collections.get_mut(&collection).and_then(|records| {
            records
                .iter_mut()
                .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
        }) else {
            return Ok(None);
        };

        if let Value::Object(fields) = &mut *record {
            for (field, value) in changes {
                fields.insert(field, value);
            }
        }

        Ok(Some(record.clone()))
    }

    async fn diagnostics(&self) -> StoreDiagnostics {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(collection, _)| collection.table_name().to_string())
            .collect();
        names.sort();

        StoreDiagnostics {
            backend: "memory",
            configured: true,
            connected: true,
            collections: names,
            error: None,
        }
    }
}
