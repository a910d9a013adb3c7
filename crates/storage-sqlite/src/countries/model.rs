//! Database model for countries.

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use geopulse_core::countries::Country;

/// Database model for one country row.
///
/// Decimals are stored as TEXT to keep their full precision, and timestamps
/// as RFC 3339 TEXT in UTC. Fixed-width formatting keeps the stored
/// timestamps lexically ordered, so `max(last_refreshed_at)` works directly
/// on the column.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(primary_key(name))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CountryDB {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<String>,
    pub estimated_gdp: Option<String>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: String,
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

// Conversion to the domain model. A decimal column that fails to parse is
// treated as absent rather than failing the whole row.
impl From<CountryDB> for Country {
    fn from(db: CountryDB) -> Self {
        Self {
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            currency_code: db.currency_code,
            exchange_rate: db
                .exchange_rate
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            estimated_gdp: db
                .estimated_gdp
                .as_deref()
                .and_then(|s| Decimal::from_str(s).ok()),
            flag_url: db.flag_url,
            last_refreshed_at: parse_timestamp(&db.last_refreshed_at),
        }
    }
}

impl From<Country> for CountryDB {
    fn from(domain: Country) -> Self {
        Self {
            name: domain.name,
            capital: domain.capital,
            region: domain.region,
            population: domain.population,
            currency_code: domain.currency_code,
            exchange_rate: domain.exchange_rate.map(|d| d.to_string()),
            estimated_gdp: domain.estimated_gdp.map(|d| d.to_string()),
            flag_url: domain.flag_url,
            last_refreshed_at: format_timestamp(domain.last_refreshed_at),
        }
    }
}
