use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin client for the REST data API backing the hospital records.
///
/// Collections are addressed as `/rest/v1/<collection>` with PostgREST-style
/// filter strings (`id=eq.<uuid>`, `order=created_at.desc`, ...).
pub struct RecordStoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecordStoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
        }
    }

    fn headers(&self, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if !self.api_key.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&self.api_key) {
                headers.insert("apikey", value);
            }
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if returning {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        returning: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(returning));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fetch all records of a collection matching a filter string.
    pub async fn find<T>(&self, collection: &str, query: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = if query.is_empty() {
            format!("/rest/v1/{}", collection)
        } else {
            format!("/rest/v1/{}?{}", collection, query)
        };
        self.request(Method::GET, &path, None, false).await
    }

    /// Fetch a single record by id. `Ok(None)` when the id does not resolve.
    pub async fn find_by_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self
            .find(collection, &format!("id=eq.{}", id))
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Insert one record and return the stored representation.
    pub async fn insert<T>(&self, collection: &str, record: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}", collection);
        let mut rows: Vec<T> = self
            .request(Method::POST, &path, Some(record), true)
            .await?;

        if rows.is_empty() {
            return Err(anyhow!("Insert into {} returned no representation", collection));
        }
        Ok(rows.remove(0))
    }

    /// Apply a partial update to a record. `Ok(None)` when the id does not resolve.
    pub async fn update_by_id<T>(&self, collection: &str, id: &str, patch: Value) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}?id=eq.{}", collection, id);
        let mut rows: Vec<T> = self
            .request(Method::PATCH, &path, Some(patch), true)
            .await?;

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Delete a record by id. Returns whether a record was actually removed.
    pub async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool> {
        let path = format!("/rest/v1/{}?id=eq.{}", collection, id);
        let rows: Vec<Value> = self
            .request(Method::DELETE, &path, None, true)
            .await?;
        Ok(!rows.is_empty())
    }
}
