use crate::countries::countries_model::{
    Country, CountryFilters, StoreStatus, UpsertOutcome,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for country repository operations.
///
/// Reads are synchronous; writes go through the storage layer's serialized
/// writer and are therefore async. `get_by_name` and `delete_by_name` match
/// case-insensitively; `upsert` matches the natural key exactly.
#[async_trait]
pub trait CountryRepositoryTrait: Send + Sync {
    /// Insert-or-overwrite keyed by `name`. Atomic per record and safe to
    /// call repeatedly with identical input.
    async fn upsert(&self, record: Country) -> Result<UpsertOutcome>;
    fn get_by_name(&self, name: &str) -> Result<Country>;
    async fn delete_by_name(&self, name: &str) -> Result<usize>;
    fn list(&self, filters: &CountryFilters) -> Result<Vec<Country>>;
    fn status(&self) -> Result<StoreStatus>;
    /// Rows with an `estimated_gdp`, descending, at most `limit` of them.
    /// Rows without an estimate are excluded, not treated as zero.
    fn top_by_gdp(&self, limit: usize) -> Result<Vec<Country>>;
}

/// Trait for country query/delete operations exposed to the outer surface.
#[async_trait]
pub trait CountryServiceTrait: Send + Sync {
    fn get_countries(&self, filters: &CountryFilters) -> Result<Vec<Country>>;
    fn get_country(&self, name: &str) -> Result<Country>;
    async fn delete_country(&self, name: &str) -> Result<usize>;
    fn get_status(&self) -> Result<StoreStatus>;
}
