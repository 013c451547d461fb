//! JSON persistence for the hidden gem registry.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use log::{debug, info};
use thiserror::Error;
use trailmark_core::{GemError, GemRegistry, GemSubmission, HiddenGem};
use trailmark_fs::{ensure_parent_dir, read_optional, write_atomic};

/// Errors raised while reading or writing the gem file.
#[derive(Debug, Error)]
pub enum GemStoreError {
    /// The gem file exists but could not be read.
    #[error("failed to read gem store at {path:?}: {source}")]
    Read {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The gem file is not a JSON array of gems.
    #[error("failed to decode gem store at {path:?}: {source}")]
    Decode {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The directory holding the gem file could not be created.
    #[error("failed to create directory for gem store at {path:?}: {source}")]
    CreateParent {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the gem file failed.
    #[error("failed to write gem store at {path:?}: {source}")]
    Write {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The registry could not be encoded as JSON.
    #[error("failed to encode gems: {0}")]
    Encode(#[source] serde_json::Error),
    /// The registry refused the submission.
    #[error(transparent)]
    Gem(#[from] GemError),
}

/// A [`GemRegistry`] backed by a JSON file.
///
/// The file holds the registry's gems newest-first. Opening a path with no
/// file seeds the sample gems and writes them out, so a fresh install has
/// something to browse.
#[derive(Debug)]
pub struct GemStore {
    path: Utf8PathBuf,
    registry: GemRegistry,
}

impl GemStore {
    /// Open the store at `path`, seeding it when the file is missing.
    ///
    /// # Errors
    /// [`GemStoreError::Read`] or [`GemStoreError::Decode`] for an existing
    /// file that cannot be loaded, and the errors of [`GemStore::save`] when
    /// seeding.
    pub fn open(path: &Utf8Path) -> Result<Self, GemStoreError> {
        let contents = read_optional(path).map_err(|source| GemStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(json) = contents else {
            info!("no gem store at {path}; seeding sample gems");
            let store = Self {
                path: path.to_path_buf(),
                registry: GemRegistry::with_samples(),
            };
            store.save()?;
            return Ok(store);
        };

        let gems: Vec<HiddenGem> =
            serde_json::from_str(&json).map_err(|source| GemStoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("loaded {} gems from {path}", gems.len());
        Ok(Self {
            path: path.to_path_buf(),
            registry: GemRegistry::from_gems(gems),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The in-memory registry.
    #[must_use]
    pub const fn registry(&self) -> &GemRegistry {
        &self.registry
    }

    /// Submit a gem and persist the registry when it is accepted.
    ///
    /// Nothing is written when the registry refuses the submission, and the
    /// in-memory registry only changes once the write succeeds.
    ///
    /// # Errors
    /// [`GemStoreError::Gem`] for refused submissions and the errors of
    /// [`GemStore::save`].
    pub fn submit(
        &mut self,
        submission: GemSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<HiddenGem, GemStoreError> {
        let mut staged = self.registry.clone();
        let gem = staged.submit(submission, submitted_at)?;
        persist(&self.path, &staged)?;
        self.registry = staged;
        Ok(gem)
    }

    /// Write every gem to the backing file, replacing its contents.
    ///
    /// # Errors
    /// [`GemStoreError::Encode`], [`GemStoreError::CreateParent`] or
    /// [`GemStoreError::Write`].
    pub fn save(&self) -> Result<(), GemStoreError> {
        persist(&self.path, &self.registry)
    }
}

fn persist(path: &Utf8Path, registry: &GemRegistry) -> Result<(), GemStoreError> {
    let payload = serde_json::to_vec_pretty(registry.gems()).map_err(GemStoreError::Encode)?;
    ensure_parent_dir(path).map_err(|source| GemStoreError::CreateParent {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &payload).map_err(|source| GemStoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} gems to {path}", registry.len());
    Ok(())
}
