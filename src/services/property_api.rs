use crate::models::{CatalogQuery, Property};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the property backend
#[derive(Debug, Error)]
pub enum PropertyApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Property backend REST client
///
/// Read-only: the backend owns listings, this service only fetches them
/// for scoring.
pub struct PropertyApiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl PropertyApiClient {
    /// Create a new property backend client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, PropertyApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// List properties matching the catalog query
    pub async fn list_properties(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<Property>, PropertyApiError> {
        let url = format!("{}/properties{}", self.base_url, build_query_string(query));

        tracing::debug!("Fetching properties from: {}", url);

        let response = self.get(&url).send().await?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(PropertyApiError::Unauthorized)
            }
            status => {
                return Err(PropertyApiError::Api(format!(
                    "Failed to list properties: {}",
                    status
                )))
            }
        }

        let json: Value = response.json().await?;
        let properties = parse_property_list(json)?;

        tracing::debug!("Fetched {} properties", properties.len());

        Ok(properties)
    }

    /// Get a single property by id
    pub async fn get_property(&self, id: &str) -> Result<Property, PropertyApiError> {
        let url = format!("{}/properties/{}", self.base_url, urlencoding::encode(id));

        tracing::debug!("Fetching property: {}", id);

        let response = self.get(&url).send().await?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(PropertyApiError::NotFound(format!("Property {} not found", id)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(PropertyApiError::Unauthorized)
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch property {}: {} - {}", id, status, body);
                return Err(PropertyApiError::Api(format!(
                    "Failed to fetch property: {}",
                    status
                )));
            }
        }

        let json: Value = response.json().await?;

        // Some backends wrap single records in a data envelope
        let data = json.get("data").cloned().unwrap_or(json);

        serde_json::from_value(data)
            .map_err(|e| PropertyApiError::InvalidResponse(format!("Failed to parse property: {}", e)))
    }
}

fn build_query_string(query: &CatalogQuery) -> String {
    let mut params = Vec::new();
    if let Some(city) = &query.city {
        params.push(format!("city={}", urlencoding::encode(city)));
    }
    if let Some(property_type) = &query.property_type {
        params.push(format!("type={}", urlencoding::encode(property_type)));
    }
    if let Some(limit) = query.limit {
        params.push(format!("limit={}", limit));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Accepts a bare array or a `data` / `properties` envelope; skips records
/// that fail to parse.
fn parse_property_list(json: Value) -> Result<Vec<Property>, PropertyApiError> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data").or_else(|| obj.remove("properties")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(PropertyApiError::InvalidResponse(
                    "Missing properties array".into(),
                ))
            }
        },
        _ => {
            return Err(PropertyApiError::InvalidResponse(
                "Expected an array or object".into(),
            ))
        }
    };

    let total = items.len();
    let properties: Vec<Property> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Property>(item) {
            Ok(property) => Some(property),
            Err(e) => {
                tracing::warn!("Skipping malformed property record: {}", e);
                None
            }
        })
        .collect();

    let skipped = total - properties.len();
    if skipped > 0 {
        tracing::warn!("Skipped {} of {} property records", skipped, total);
    }

    Ok(properties)
}
