//! Country catalog feed client.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::FeedError;

/// Trait for fetching the raw country catalog.
///
/// The catalog is returned as raw JSON values rather than typed records:
/// individual records may be missing fields or malformed, and the enricher
/// downstream is responsible for degrading gracefully per field. Only the
/// top-level shape (a JSON array) is validated here.
#[async_trait]
pub trait CatalogProviderTrait: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<Value>, FeedError>;
}

/// HTTP client for the country catalog endpoint.
pub struct CountryCatalogProvider {
    client: Client,
    url: String,
}

impl CountryCatalogProvider {
    /// Create a catalog provider for the given endpoint with a bounded
    /// request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogProviderTrait for CountryCatalogProvider {
    async fn fetch_catalog(&self) -> Result<Vec<Value>, FeedError> {
        debug!("Fetching country catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FeedError::InvalidFormat(format!("catalog payload is not JSON: {}", e)))?;

        match payload {
            Value::Array(records) => {
                debug!("Catalog feed returned {} records", records.len());
                Ok(records)
            }
            other => Err(FeedError::InvalidFormat(format!(
                "catalog payload must be a JSON array, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&Value::Null), "null");
        assert_eq!(json_type_name(&serde_json::json!({})), "an object");
        assert_eq!(json_type_name(&serde_json::json!([1, 2])), "an array");
    }
}
