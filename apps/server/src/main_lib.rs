use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use geopulse_core::countries::{CountryService, CountryServiceTrait};
use geopulse_core::refresh::{RefreshService, RefreshServiceTrait};
use geopulse_core::summary::{SummaryService, SummaryServiceTrait};
use geopulse_feeds::{CountryCatalogProvider, ExchangeRateProvider};
use geopulse_storage_sqlite::countries::CountryRepository;
use geopulse_storage_sqlite::db;

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait + Send + Sync>,
    pub refresh_service: Arc<dyn RefreshServiceTrait + Send + Sync>,
    pub summary_service: Arc<dyn SummaryServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("GP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let repository = Arc::new(CountryRepository::new(pool, writer));

    let timeout = Duration::from_secs(config.feed_timeout_secs);
    let catalog = Arc::new(CountryCatalogProvider::new(&config.country_url, timeout));
    let rates = Arc::new(ExchangeRateProvider::new(&config.rate_url, timeout));

    let summary_service = Arc::new(SummaryService::new(
        repository.clone(),
        PathBuf::from(&config.cache_dir),
    ));
    let refresh_service = Arc::new(RefreshService::new(
        catalog,
        rates,
        repository.clone(),
        summary_service.clone(),
    ));
    let country_service = Arc::new(CountryService::new(repository));

    Ok(Arc::new(AppState {
        country_service,
        refresh_service,
        summary_service,
        db_path,
    }))
}
