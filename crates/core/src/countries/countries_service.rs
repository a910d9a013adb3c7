use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::countries::countries_model::{Country, CountryFilters, StoreStatus};
use crate::countries::countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
use crate::errors::Result;

/// Thin service over the country repository, consumed by the HTTP surface.
pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CountryServiceTrait for CountryService {
    fn get_countries(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        self.repository.list(filters)
    }

    fn get_country(&self, name: &str) -> Result<Country> {
        debug!("Looking up country '{}'", name);
        self.repository.get_by_name(name)
    }

    async fn delete_country(&self, name: &str) -> Result<usize> {
        debug!("Deleting country '{}'", name);
        self.repository.delete_by_name(name).await
    }

    fn get_status(&self) -> Result<StoreStatus> {
        self.repository.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::testing::MemoryCountryRepository;
    use crate::errors::{DatabaseError, Error};
    use chrono::Utc;

    fn sample(name: &str) -> Country {
        Country {
            name: name.to_string(),
            capital: Some("Capital".to_string()),
            region: Some("Region".to_string()),
            population: 42,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: None,
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_country_is_case_insensitive() {
        let repo = Arc::new(MemoryCountryRepository::default());
        repo.upsert(sample("Wakanda")).await.unwrap();

        let service = CountryService::new(repo);
        let found = service.get_country("wakanda").unwrap();
        assert_eq!(found.name, "Wakanda");
    }

    #[tokio::test]
    async fn delete_missing_country_is_not_found() {
        let service = CountryService::new(Arc::new(MemoryCountryRepository::default()));
        let err = service.delete_country("Atlantis").await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn status_reflects_row_count() {
        let repo = Arc::new(MemoryCountryRepository::default());
        let service = CountryService::new(repo.clone());

        let empty = service.get_status().unwrap();
        assert_eq!(empty.total_count, 0);
        assert!(empty.last_refreshed_at.is_none());

        repo.upsert(sample("Wakanda")).await.unwrap();
        let status = service.get_status().unwrap();
        assert_eq!(status.total_count, 1);
        assert!(status.last_refreshed_at.is_some());
    }
}
