//! In-memory repository used by service and orchestrator tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::countries::countries_model::{
    Country, CountryFilters, StoreStatus, UpsertOutcome,
};
use crate::countries::countries_traits::CountryRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};

/// HashMap-backed stand-in for the SQLite repository, with the same
/// case-sensitivity and NULL-ordering semantics.
#[derive(Default)]
pub struct MemoryCountryRepository {
    rows: Mutex<BTreeMap<String, Country>>,
    /// When set, every upsert fails; used to exercise per-record error
    /// isolation in the refresh loop.
    pub fail_upserts: std::sync::atomic::AtomicBool,
    /// When set, `status` fails; used to exercise regeneration failure
    /// after a prior success.
    pub fail_status: std::sync::atomic::AtomicBool,
}

impl MemoryCountryRepository {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CountryRepositoryTrait for MemoryCountryRepository {
    async fn upsert(&self, record: Country) -> Result<UpsertOutcome> {
        if self.fail_upserts.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "injected upsert failure".to_string(),
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        let outcome = if rows.contains_key(&record.name) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        rows.insert(record.name.clone(), record);
        Ok(outcome)
    }

    fn get_by_name(&self, name: &str) -> Result<Country> {
        let rows = self.rows.lock().unwrap();
        rows.values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(name.to_string())))
    }

    async fn delete_by_name(&self, name: &str) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let key = rows
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.name.clone())
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(name.to_string())))?;
        rows.remove(&key);
        Ok(1)
    }

    fn list(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        let rows = self.rows.lock().unwrap();
        let mut result: Vec<Country> = rows
            .values()
            .filter(|c| match &filters.region {
                Some(region) => c.region.as_deref() == Some(region.as_str()),
                None => true,
            })
            .filter(|c| match &filters.currency {
                Some(currency) => c.currency_code.as_deref() == Some(currency.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        if let Some(sort) = filters.sort {
            sort.apply(&mut result);
        }
        Ok(result)
    }

    fn status(&self) -> Result<StoreStatus> {
        if self.fail_status.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "injected status failure".to_string(),
            )));
        }
        let rows = self.rows.lock().unwrap();
        Ok(StoreStatus {
            total_count: rows.len() as i64,
            last_refreshed_at: rows.values().map(|c| c.last_refreshed_at).max(),
        })
    }

    fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let rows = self.rows.lock().unwrap();
        let mut with_gdp: Vec<Country> = rows
            .values()
            .filter(|c| c.estimated_gdp.is_some())
            .cloned()
            .collect();
        with_gdp.sort_by(|a, b| b.estimated_gdp.cmp(&a.estimated_gdp));
        with_gdp.truncate(limit);
        Ok(with_gdp)
    }
}
