//! Exchange-rate feed client.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::FeedError;

/// Mapping from currency code to its latest exchange rate.
pub type RateTable = HashMap<String, Decimal>;

/// Envelope returned by the exchange-rate endpoint.
///
/// A missing `rates` field is treated as "no rates available" rather than a
/// hard failure; enrichment then simply misses on every currency lookup.
#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    #[serde(default)]
    rates: HashMap<String, Value>,
}

/// Trait for fetching the currency rate table.
#[async_trait]
pub trait RateProviderTrait: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, FeedError>;
}

/// HTTP client for the exchange-rate endpoint.
pub struct ExchangeRateProvider {
    client: Client,
    url: String,
}

impl ExchangeRateProvider {
    /// Create a rate provider for the given endpoint with a bounded request
    /// timeout.
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
impl RateProviderTrait for ExchangeRateProvider {
    async fn fetch_rates(&self) -> Result<RateTable, FeedError> {
        debug!("Fetching exchange rates from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let envelope: RatesEnvelope = response
            .json()
            .await
            .map_err(|e| FeedError::InvalidFormat(format!("rate payload is not JSON: {}", e)))?;

        let table = convert_rates(envelope.rates);
        debug!("Rate feed returned {} usable rates", table.len());
        Ok(table)
    }
}

/// Convert raw JSON rate entries into decimals, skipping anything that is
/// not a usable number.
fn convert_rates(raw: HashMap<String, Value>) -> RateTable {
    let mut table = RateTable::with_capacity(raw.len());
    for (code, value) in raw {
        match value.as_f64().and_then(|f| Decimal::try_from(f).ok()) {
            Some(rate) => {
                table.insert(code, rate);
            }
            None => {
                warn!("Skipping non-numeric rate for {}: {}", code, value);
            }
        }
    }
    table
}
