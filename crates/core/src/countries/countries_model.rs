//! Country domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Domain model representing one country row.
///
/// `name` is the natural key: a refresh run either creates a new row for a
/// previously unseen name or overwrites every other field of the existing
/// row. Derived fields (`exchange_rate`, `estimated_gdp`) are optional and
/// absent whenever their inputs were unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub estimated_gdp: Option<Decimal>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Outcome of a single natural-key upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the name; one was inserted.
    Created,
    /// A row existed; all fields except the name were overwritten.
    Updated,
}

/// Filters and ordering for country listings.
#[derive(Debug, Clone, Default)]
pub struct CountryFilters {
    /// Exact match on `region`.
    pub region: Option<String>,
    /// Exact match on `currency_code`.
    pub currency: Option<String>,
    /// Requested ordering; `None` leaves the store's default order.
    pub sort: Option<CountrySort>,
}

/// Recognized sort keys for country listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySort {
    GdpDesc,
    GdpAsc,
    NameAsc,
    NameDesc,
    PopulationDesc,
    PopulationAsc,
}

impl CountrySort {
    /// Parse a sort query parameter. Unrecognized values map to `None`,
    /// which callers treat as "default order" rather than an error.
    pub fn parse(param: &str) -> Option<Self> {
        match param {
            "gdp_desc" => Some(Self::GdpDesc),
            "gdp_asc" => Some(Self::GdpAsc),
            "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            "population_desc" => Some(Self::PopulationDesc),
            "population_asc" => Some(Self::PopulationAsc),
            _ => None,
        }
    }

    /// Order rows in place according to this sort key.
    ///
    /// Rows without an `estimated_gdp` follow SQL NULL ordering: first when
    /// ascending, last when descending.
    pub fn apply(&self, rows: &mut [Country]) {
        match self {
            Self::GdpAsc => rows.sort_by(|a, b| cmp_gdp(a, b)),
            Self::GdpDesc => rows.sort_by(|a, b| cmp_gdp(b, a)),
            Self::NameAsc => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            Self::NameDesc => rows.sort_by(|a, b| b.name.cmp(&a.name)),
            Self::PopulationAsc => rows.sort_by(|a, b| a.population.cmp(&b.population)),
            Self::PopulationDesc => rows.sort_by(|a, b| b.population.cmp(&a.population)),
        }
    }
}

fn cmp_gdp(a: &Country, b: &Country) -> Ordering {
    match (a.estimated_gdp, b.estimated_gdp) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Aggregate view of the store: row count and the most recent refresh
/// timestamp across all rows (`None` when the store is empty).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub total_count: i64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}
