use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use shared_database::{
    Collection, Filter, MemoryStore, RecordStore, SharedStore, StoreDiagnostics, StoreError,
};

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Store double whose every call fails as if the backend were down.
pub struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn insert(&self, _collection: Collection, _document: Value) -> Result<Value, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn find(&self, _collection: Collection, _filter: &Filter) -> Result<Vec<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn update(
        &self,
        _collection: Collection,
        _id: &str,
        _changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn diagnostics(&self) -> StoreDiagnostics {
        StoreDiagnostics {
            backend: "unavailable",
            configured: true,
            connected: false,
            collections: Vec::new(),
            error: Some("connection refused".into()),
        }
    }
}

pub fn unavailable_store() -> SharedStore {
    Arc::new(UnavailableStore)
}

/// A fixed instant on 2030-01-07 (a Monday) so tests never depend on the clock.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 7, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid test request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid test request")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable response body");
    serde_json::from_slice(&body).expect("JSON response body")
}
