//! Refresh orchestration: pull both feeds, enrich and upsert every record,
//! then rebuild the summary artifact.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::countries::{CountryRepositoryTrait, UpsertOutcome};
use crate::enrich::{enrich, EnrichOutcome};
use crate::summary::SummaryServiceTrait;
use geopulse_feeds::{CatalogProviderTrait, FeedError, RateProviderTrait};

/// Failure of a refresh run as a whole. Per-record problems never surface
/// here; they are tallied as skips instead.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// A feed could not be reached or did not answer in time. Nothing was
    /// written; the previous store contents remain intact.
    #[error("External data source unavailable: {0}")]
    SourceUnavailable(String),

    /// A feed answered with a payload whose overall shape is unusable.
    #[error("External data source returned an invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Refresh failed: {0}")]
    Internal(String),
}

impl From<FeedError> for RefreshError {
    fn from(err: FeedError) -> Self {
        if err.is_network() {
            RefreshError::SourceUnavailable(err.to_string())
        } else {
            RefreshError::InvalidPayload(err.to_string())
        }
    }
}

/// Outcome of one completed refresh run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    /// Timestamp stamped onto every record touched by this run.
    pub refreshed_at: DateTime<Utc>,
}

/// Running created/updated/skipped counters, folded record by record.
#[derive(Debug, Default)]
struct RefreshTally {
    created: u64,
    updated: u64,
    skipped: u64,
}

impl RefreshTally {
    fn add_upsert(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }

    fn add_skip(&mut self) {
        self.skipped += 1;
    }

    fn into_report(self, refreshed_at: DateTime<Utc>) -> RefreshReport {
        RefreshReport {
            created: self.created,
            updated: self.updated,
            skipped: self.skipped,
            refreshed_at,
        }
    }
}

#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    async fn refresh(&self) -> Result<RefreshReport, RefreshError>;
}

/// Drives a full refresh run end to end.
pub struct RefreshService {
    catalog: Arc<dyn CatalogProviderTrait>,
    rates: Arc<dyn RateProviderTrait>,
    repository: Arc<dyn CountryRepositoryTrait>,
    summary: Arc<dyn SummaryServiceTrait>,
}

impl RefreshService {
    pub fn new(
        catalog: Arc<dyn CatalogProviderTrait>,
        rates: Arc<dyn RateProviderTrait>,
        repository: Arc<dyn CountryRepositoryTrait>,
        summary: Arc<dyn SummaryServiceTrait>,
    ) -> Self {
        Self {
            catalog,
            rates,
            repository,
            summary,
        }
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        // Both feeds must succeed before anything is written, so a dead
        // feed leaves the store exactly as it was.
        let records = self.catalog.fetch_catalog().await?;
        let rates = self.rates.fetch_rates().await?;

        let run_timestamp = Utc::now();
        let mut tally = RefreshTally::default();

        for raw in &records {
            match enrich(raw, &rates, run_timestamp) {
                EnrichOutcome::Enriched(country) => {
                    let name = country.name.clone();
                    match self.repository.upsert(country).await {
                        Ok(outcome) => tally.add_upsert(outcome),
                        Err(e) => {
                            warn!("Skipping '{}': upsert failed: {}", name, e);
                            tally.add_skip();
                        }
                    }
                }
                EnrichOutcome::Skipped(reason) => {
                    warn!("Skipping catalog record: {}", reason);
                    tally.add_skip();
                }
            }
        }

        // The artifact is best-effort: a render or write failure must not
        // fail a refresh whose data work already succeeded.
        if let Err(e) = self.summary.regenerate() {
            error!("Failed to regenerate summary artifact: {}", e);
        }

        let report = tally.into_report(run_timestamp);
        info!(
            "Refresh complete: {} created, {} updated, {} skipped",
            report.created, report.updated, report.skipped
        );
        Ok(report)
    }
}
