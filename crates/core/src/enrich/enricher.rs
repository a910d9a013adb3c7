//! Per-record enrichment: merging one raw catalog record with the rate
//! table into an upsert-ready [`Country`].
//!
//! The enricher never fails a record for malformed optional fields; every
//! anomaly short of a missing name degrades to an absent derived field.

use chrono::{DateTime, Utc};
use log::warn;
use rand::Rng;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;

use crate::constants::{GDP_FACTOR_MAX, GDP_FACTOR_MIN};
use crate::countries::Country;
use geopulse_feeds::RateTable;

/// Result of enriching a single raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichOutcome {
    /// The record had a usable name and is ready to upsert.
    Enriched(Country),
    /// The record was intentionally excluded; the caller counts it and
    /// moves on.
    Skipped(SkipReason),
}

/// Why a raw record was excluded from upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record is missing a non-empty string `name`.
    MissingName,
    /// The record is not a JSON object at all.
    NotAnObject,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "record has no usable name"),
            SkipReason::NotAnObject => write!(f, "record is not an object"),
        }
    }
}

/// Merge one raw catalog record with the rate table.
///
/// Field semantics:
/// - `name` is required; anything else degrades gracefully.
/// - `population` defaults to 0 when absent, non-numeric, or negative.
/// - `currency_code` comes from the first entry of the `currencies` list.
/// - `exchange_rate` is a rate-table lookup; a miss is not an error.
/// - `estimated_gdp` is only computed when `population > 0` and the rate is
///   positive.
pub fn enrich(raw: &Value, rates: &RateTable, run_timestamp: DateTime<Utc>) -> EnrichOutcome {
    let record = match raw.as_object() {
        Some(map) => map,
        None => return EnrichOutcome::Skipped(SkipReason::NotAnObject),
    };

    let name = match record.get("name").and_then(Value::as_str) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return EnrichOutcome::Skipped(SkipReason::MissingName),
    };

    let capital = record.get("capital").and_then(Value::as_str).map(String::from);
    let region = record.get("region").and_then(Value::as_str).map(String::from);
    let flag_url = record.get("flag").and_then(Value::as_str).map(String::from);

    let population = record
        .get("population")
        .and_then(Value::as_i64)
        .filter(|p| *p >= 0)
        .unwrap_or(0);

    let currency_code = first_currency_code(record.get("currencies"));

    let exchange_rate = currency_code
        .as_deref()
        .and_then(|code| rates.get(code))
        .copied();

    let estimated_gdp = estimate_gdp(&name, population, exchange_rate);

    EnrichOutcome::Enriched(Country {
        name,
        capital,
        region,
        population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url,
        last_refreshed_at: run_timestamp,
    })
}

/// Code of the first element of the record's currency list, when that list
/// is non-empty and its first element exposes a string `code`.
fn first_currency_code(currencies: Option<&Value>) -> Option<String> {
    currencies?
        .as_array()?
        .first()?
        .get("code")?
        .as_str()
        .filter(|code| !code.is_empty())
        .map(String::from)
}

/// Synthetic GDP estimate: `population * U(1000..=2000) / exchange_rate`.
///
/// The uniform multiplier is drawn once per record and makes the metric
/// intentionally non-reproducible; it is a placeholder, not a real economic
/// computation. Checked decimal arithmetic turns any overflow into an
/// absent estimate rather than a record failure.
fn estimate_gdp(name: &str, population: i64, exchange_rate: Option<Decimal>) -> Option<Decimal> {
    let rate = exchange_rate.filter(|r| r.is_sign_positive() && !r.is_zero())?;
    if population <= 0 {
        return None;
    }

    let factor = Decimal::from(rand::thread_rng().gen_range(GDP_FACTOR_MIN..=GDP_FACTOR_MAX));
    let gdp = Decimal::from(population)
        .checked_mul(factor)
        .and_then(|product| product.checked_div(rate));

    if gdp.is_none() {
        warn!("GDP estimate overflowed for {}, leaving it absent", name);
    }
    gdp
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn rates(entries: &[(&str, Decimal)]) -> RateTable {
        entries
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    #[test]
    fn full_record_is_enriched() {
        let raw = json!({
            "name": "Wakanda",
            "capital": "Birnin Zana",
            "region": "Africa",
            "population": 1_000_000,
            "flag": "https://example.com/wakanda.svg",
            "currencies": [{"code": "WAK", "name": "Wakandan dollar"}],
        });
        let table = rates(&[("WAK", dec!(2.0))]);
        let now = Utc::now();

        let outcome = enrich(&raw, &table, now);
        let country = match outcome {
            EnrichOutcome::Enriched(c) => c,
            other => panic!("expected enriched record, got {:?}", other),
        };

        assert_eq!(country.name, "Wakanda");
        assert_eq!(country.capital.as_deref(), Some("Birnin Zana"));
        assert_eq!(country.region.as_deref(), Some("Africa"));
        assert_eq!(country.population, 1_000_000);
        assert_eq!(country.currency_code.as_deref(), Some("WAK"));
        assert_eq!(country.exchange_rate, Some(dec!(2.0)));
        assert_eq!(country.last_refreshed_at, now);

        // Exact magnitude is random; assert presence and bounds instead.
        let gdp = country.estimated_gdp.expect("gdp should be present");
        assert!(gdp >= Decimal::from(1_000_000i64) * dec!(1000) / dec!(2.0));
        assert!(gdp <= Decimal::from(1_000_000i64) * dec!(2000) / dec!(2.0));
    }

    #[test]
    fn missing_name_is_skipped() {
        let raw = json!({"population": 500});
        let outcome = enrich(&raw, &RateTable::new(), Utc::now());
        assert_eq!(outcome, EnrichOutcome::Skipped(SkipReason::MissingName));
    }

    #[test]
    fn empty_name_is_skipped() {
        let raw = json!({"name": ""});
        let outcome = enrich(&raw, &RateTable::new(), Utc::now());
        assert_eq!(outcome, EnrichOutcome::Skipped(SkipReason::MissingName));
    }

    #[test]
    fn non_object_record_is_skipped() {
        let outcome = enrich(&json!("Wakanda"), &RateTable::new(), Utc::now());
        assert_eq!(outcome, EnrichOutcome::Skipped(SkipReason::NotAnObject));
    }

    #[test]
    fn non_numeric_population_defaults_to_zero() {
        let raw = json!({"name": "Wakanda", "population": "lots"});
        match enrich(&raw, &RateTable::new(), Utc::now()) {
            EnrichOutcome::Enriched(c) => {
                assert_eq!(c.population, 0);
                assert!(c.estimated_gdp.is_none());
            }
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn negative_population_defaults_to_zero() {
        let raw = json!({"name": "Wakanda", "population": -5});
        match enrich(&raw, &RateTable::new(), Utc::now()) {
            EnrichOutcome::Enriched(c) => assert_eq!(c.population, 0),
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn unknown_currency_leaves_rate_and_gdp_absent() {
        let raw = json!({
            "name": "Wakanda",
            "population": 1_000_000,
            "currencies": [{"code": "WAK"}],
        });
        match enrich(&raw, &RateTable::new(), Utc::now()) {
            EnrichOutcome::Enriched(c) => {
                assert_eq!(c.currency_code.as_deref(), Some("WAK"));
                assert!(c.exchange_rate.is_none());
                assert!(c.estimated_gdp.is_none());
            }
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn zero_rate_leaves_gdp_absent() {
        let raw = json!({
            "name": "Wakanda",
            "population": 1_000_000,
            "currencies": [{"code": "WAK"}],
        });
        let table = rates(&[("WAK", Decimal::ZERO)]);
        match enrich(&raw, &table, Utc::now()) {
            EnrichOutcome::Enriched(c) => {
                assert_eq!(c.exchange_rate, Some(Decimal::ZERO));
                assert!(c.estimated_gdp.is_none());
            }
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn zero_population_leaves_gdp_absent() {
        let raw = json!({
            "name": "Wakanda",
            "currencies": [{"code": "WAK"}],
        });
        let table = rates(&[("WAK", dec!(2.0))]);
        match enrich(&raw, &table, Utc::now()) {
            EnrichOutcome::Enriched(c) => {
                assert_eq!(c.population, 0);
                assert!(c.estimated_gdp.is_none());
            }
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn empty_currency_list_yields_no_code() {
        let raw = json!({"name": "Wakanda", "currencies": []});
        match enrich(&raw, &RateTable::new(), Utc::now()) {
            EnrichOutcome::Enriched(c) => assert!(c.currency_code.is_none()),
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn malformed_first_currency_yields_no_code() {
        let raw = json!({"name": "Wakanda", "currencies": ["WAK"]});
        match enrich(&raw, &RateTable::new(), Utc::now()) {
            EnrichOutcome::Enriched(c) => assert!(c.currency_code.is_none()),
            other => panic!("expected enriched record, got {:?}", other),
        }
    }

    #[test]
    fn only_first_currency_is_used() {
        let raw = json!({
            "name": "Wakanda",
            "currencies": [{"code": "WAK"}, {"code": "USD"}],
        });
        let table = rates(&[("USD", dec!(1.0))]);
        match enrich(&raw, &table, Utc::now()) {
            EnrichOutcome::Enriched(c) => {
                assert_eq!(c.currency_code.as_deref(), Some("WAK"));
                assert!(c.exchange_rate.is_none());
            }
            other => panic!("expected enriched record, got {:?}", other),
        }
    }
}
