use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::history::StoredResult;

pub const DEFAULT_STORE_PATH: &str = "bonus_history.json";
pub const RESULTS_KEY: &str = "results";
pub const EXCLUSIONS_KEY: &str = "excludedFromPodium";

#[derive(Error, Debug)]
pub enum HistoryStoreError {
    #[error("failed to read history store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write history store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("history store {path} is not valid json: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize history store: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreRecord {
    #[serde(rename = "results", default)]
    results: Vec<StoredResult>,
    #[serde(rename = "excludedFromPodium", default)]
    excluded_from_podium: Vec<String>,
    /// Keys written by other tools are kept as they are.
    #[serde(flatten)]
    other: BTreeMap<String, Value>,
}

/// Local key-value store holding the calculation history and the podium
/// exclusion list in a single JSON document.
///
/// Results are kept most-recent first. Every save rewrites the whole file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    record: StoreRecord,
}

impl HistoryStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HistoryStoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!("history store {} does not exist yet", path.display());
            return Ok(Self {
                path,
                record: StoreRecord::default(),
            });
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| HistoryStoreError::Read {
            path: path.clone(),
            source,
        })?;
        let record = if contents.trim().is_empty() {
            StoreRecord::default()
        } else {
            serde_json::from_str(&contents).map_err(|source| HistoryStoreError::Parse {
                path: path.clone(),
                source,
            })?
        };
        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn results(&self) -> &[StoredResult] {
        &self.record.results
    }

    /// Adds entries in front of the existing history.
    ///
    /// `entries` is expected in calculation order; the last one calculated
    /// ends up first.
    pub fn append(&mut self, entries: impl IntoIterator<Item = StoredResult>) {
        for entry in entries {
            self.record.results.insert(0, entry);
        }
    }

    /// Removes every result. Returns how many were dropped.
    pub fn clear_results(&mut self) -> usize {
        let removed = self.record.results.len();
        self.record.results.clear();
        removed
    }

    pub fn exclusions(&self) -> &[String] {
        &self.record.excluded_from_podium
    }

    /// Returns false when the name was already excluded.
    pub fn exclude(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.record.excluded_from_podium.iter().any(|n| n == name) {
            return false;
        }
        self.record.excluded_from_podium.push(name.to_string());
        self.record.excluded_from_podium.sort();
        true
    }

    /// Returns false when the name was not excluded.
    pub fn include(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.record.excluded_from_podium.len();
        self.record.excluded_from_podium.retain(|n| n != name);
        before != self.record.excluded_from_podium.len()
    }

    pub fn save(&self) -> Result<(), HistoryStoreError> {
        let json = serde_json::to_string_pretty(&self.record)?;
        std::fs::write(&self.path, json).map_err(|source| HistoryStoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            results = self.record.results.len(),
            "history store written to {}",
            self.path.display()
        );
        Ok(())
    }
}
