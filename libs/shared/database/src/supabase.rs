use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::{Collection, RecordStore, StoreDiagnostics};

const RETURN_REPRESENTATION: &str = "return=representation";

/// PostgREST-backed store. One table per collection, every request bounded
/// by the configured store timeout.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.store_timeout())
            .connect_timeout(config.store_timeout())
            .build()
            .map_err(|e| StoreError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.supabase_url.clone(),
            service_key: config.supabase_service_key.clone(),
        })
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    fn get_headers(&self, prefer: Option<&'static str>) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.service_key)
            .map_err(|_| StoreError::Unavailable("Service key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.service_key))
            .map_err(|_| StoreError::Unavailable("Service key is not a valid header value".into()))?;

        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(prefer) = prefer {
            headers.insert("Prefer", HeaderValue::from_static(prefer));
        }

        Ok(headers)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        prefer: Option<&'static str>,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(prefer)?);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Store request to {} timed out", url);
                StoreError::Unavailable(format!("Store request timed out: {}", e))
            } else {
                warn!("Store request to {} failed: {}", url, e);
                StoreError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                408 | 429 | 500..=599 => {
                    StoreError::Unavailable(format!("Store error ({}): {}", status, error_text))
                }
                code => StoreError::Rejected {
                    status: code,
                    message: error_text,
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Malformed(format!("Failed to decode store response: {}", e)))
    }

    fn table_path(collection: Collection, filter: &Filter) -> String {
        if filter.is_empty() {
            format!("/rest/v1/{}", collection.table_name())
        } else {
            format!(
                "/rest/v1/{}?{}",
                collection.table_name(),
                filter.to_query_string()
            )
        }
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn insert(&self, collection: Collection, document: Value) -> Result<Value, StoreError> {
        let mut created: Vec<Value> = self
            .request(
                Method::POST,
                &Self::table_path(collection, &Filter::new()),
                Some(document.clone()),
                Some(RETURN_REPRESENTATION),
            )
            .await?;

        if created.is_empty() {
            return Ok(document);
        }
        Ok(created.swap_remove(0))
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.request(Method::GET, &Self::table_path(collection, filter), None, None)
            .await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Value,
    ) -> Result<Option<Value>, StoreError> {
        let mut updated: Vec<Value> = self
            .request(
                Method::PATCH,
                &Self::table_path(collection, &Filter::by_id(id)),
                Some(changes),
                Some(RETURN_REPRESENTATION),
            )
            .await?;

        if updated.is_empty() {
            return Ok(None);
        }
        Ok(Some(updated.swap_remove(0)))
    }

    async fn diagnostics(&self) -> StoreDiagnostics {
        let mut collections = Vec::new();
        let mut last_error = None;

        for collection in Collection::ALL {
            let path = format!("/rest/v1/{}?select=id&limit=1", collection.table_name());
            match self.request::<Vec<Value>>(Method::GET, &path, None, None).await {
                Ok(_) => collections.push(collection.table_name().to_string()),
                Err(e) => last_error = Some(e.to_string().chars().take(80).collect()),
            }
        }

        StoreDiagnostics {
            backend: "supabase",
            configured: !self.base_url.is_empty(),
            connected: !collections.is_empty(),
            collections,
            error: last_error,
        }
    }
}
