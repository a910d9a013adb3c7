use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use log::debug;

use crate::constants::{SUMMARY_FILENAME, SUMMARY_TOP_COUNT};
use crate::countries::CountryRepositoryTrait;
use crate::errors::{ArtifactError, Error, Result};
use crate::summary::canvas::{self, SummarySnapshot};

pub trait SummaryServiceTrait: Send + Sync {
    /// Rebuild the cached artifact from the current store contents.
    fn regenerate(&self) -> Result<()>;

    /// Raw PNG bytes of the cached artifact, or [`ArtifactError::NotFound`]
    /// when no refresh has produced one yet.
    fn read_artifact(&self) -> Result<Vec<u8>>;
}

/// Owns the cached summary PNG under the cache directory.
///
/// Regeneration renders to a sibling temp file and renames it into place,
/// so readers only ever observe a complete artifact.
pub struct SummaryService {
    repository: Arc<dyn CountryRepositoryTrait>,
    cache_dir: PathBuf,
}

impl SummaryService {
    pub fn new(repository: Arc<dyn CountryRepositoryTrait>, cache_dir: PathBuf) -> Self {
        Self {
            repository,
            cache_dir,
        }
    }

    fn artifact_path(&self) -> PathBuf {
        self.cache_dir.join(SUMMARY_FILENAME)
    }
}

impl SummaryServiceTrait for SummaryService {
    fn regenerate(&self) -> Result<()> {
        let status = self.repository.status()?;
        let snapshot = SummarySnapshot {
            total_count: status.total_count,
            // An empty store has no refresh timestamp; stamp the artifact
            // with its own generation time instead.
            generated_at: status.last_refreshed_at.unwrap_or_else(Utc::now),
            top_by_gdp: self.repository.top_by_gdp(SUMMARY_TOP_COUNT)?,
        };
        let bytes = canvas::render(&snapshot).map_err(Error::Artifact)?;

        fs::create_dir_all(&self.cache_dir)?;
        let target = self.artifact_path();
        let staging = target.with_extension("png.tmp");
        fs::write(&staging, &bytes)?;
        fs::rename(&staging, &target)?;

        debug!(
            "Regenerated summary artifact at {} ({} bytes)",
            target.display(),
            bytes.len()
        );
        Ok(())
    }

    fn read_artifact(&self) -> Result<Vec<u8>> {
        let path = self.artifact_path();
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::Artifact(ArtifactError::NotFound))
            }
            Err(e) => Err(e.into()),
        }
    }
}
