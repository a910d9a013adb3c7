//! Upstream feed clients for GeoPulse.
//!
//! This crate contains the HTTP clients for the two external data sources
//! consumed by the refresh pipeline:
//! - the country catalog feed (a JSON array of country objects)
//! - the exchange-rate feed (a JSON object with a `rates` mapping)
//!
//! Both clients issue a single timeout-bounded request and classify failures
//! as network errors or invalid-format errors. Retries, if any, are the
//! caller's concern.

pub mod catalog;
pub mod errors;
pub mod rates;

pub use catalog::{CatalogProviderTrait, CountryCatalogProvider};
pub use errors::FeedError;
pub use rates::{ExchangeRateProvider, RateProviderTrait, RateTable};
