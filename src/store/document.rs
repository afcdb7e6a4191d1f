//! The on-disk hero document.
//!
//! Every mutation is a full read, modify, write cycle over the JSON array.
//! Mutations are serialized by a per-document mutex so concurrent requests
//! cannot lose each other's updates. Writes go to a sibling temporary file
//! that is renamed over the document, so readers never observe a partial
//! write.

use std::path::{Path, PathBuf};

use strum::{Display, IntoStaticStr};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::StoreError;
use crate::metrics;

use super::types::Hero;

/// Store operation, used to label logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOp {
    /// Append a power or create a hero.
    Upsert,
    /// Move a hero to a new key.
    Rename,
    /// Remove a hero.
    Delete,
}

/// Hero document on disk.
#[derive(Debug)]
pub struct HeroStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HeroStore {
    /// Create a store backed by the document at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    ///
    /// A missing file is an error here; see [`HeroStore::snapshot`].
    pub async fn load_all(&self) -> Result<Vec<Hero>, StoreError> {
        metrics::inc_document_reads();

        let data = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&data).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the document, treating a missing file as an empty store.
    pub async fn snapshot(&self) -> Result<Vec<Hero>, StoreError> {
        match self.load_all().await {
            Ok(heroes) => Ok(heroes),
            Err(e) if e.is_missing_document() => {
                debug!(path = %self.path.display(), "Hero document missing, starting empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the document with `records`, pretty-printed.
    pub async fn persist(&self, records: &[Hero]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;

        if let Err(source) = fs::rename(&tmp_path, &self.path).await {
            // Leave the original document untouched.
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        metrics::inc_document_writes();
        debug!(path = %self.path.display(), heroes = records.len(), "Hero document written");
        Ok(())
    }

    /// Run one read-modify-write cycle under the document lock.
    ///
    /// If `f` fails nothing is written.
    #[instrument(skip(self, f), fields(path = %self.path.display()))]
    pub async fn mutate<T, F>(&self, op: StoreOp, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Hero>) -> Result<T, StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let mut heroes = self.snapshot().await?;
            let output = f(&mut heroes)?;
            self.persist(&heroes).await?;
            Ok::<T, StoreError>(output)
        }
        .await;

        match &result {
            Err(e @ (StoreError::NotFound { .. } | StoreError::DuplicateKey { .. })) => {
                debug!(%op, error = %e, "Store mutation rejected");
            }
            Err(e) => {
                metrics::inc_store_errors(op);
                warn!(%op, error = %e, "Store mutation failed");
            }
            Ok(_) => {}
        }

        result
    }

    /// Render the current document as pretty JSON, missing file as `[]`.
    pub async fn export_json(&self) -> crate::Result<String> {
        let heroes = self.snapshot().await?;
        Ok(serde_json::to_string_pretty(&heroes)?)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
