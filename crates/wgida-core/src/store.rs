//! Dataset loading and distinct-value queries.

use crate::key::{run_key, Family, FilterValue, ParamKey};
use crate::model::{Run, SharedRun};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The full run collection, immutable for the session.
///
/// Loaded once at startup; there is no retry policy. A failed load leaves
/// the caller with whatever store it already had (usually the empty one).
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    runs: Vec<SharedRun>,
}

impl DatasetStore {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs: runs.into_iter().map(Arc::new).collect(),
        }
    }

    /// Load a JSON array of runs from disk. Single attempt.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path)?;
        let runs: Vec<Run> = serde_json::from_str(&payload)?;
        info!(runs = runs.len(), path = %path.display(), "dataset loaded");
        Ok(Self::new(runs))
    }

    pub fn runs(&self) -> &[SharedRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Distinct values observed in `family`, deduplicated by id and sorted
    /// ascending by id. Labels never participate in identity.
    pub fn distinct_values(&self, family: Family) -> Vec<FilterValue> {
        let ids: BTreeSet<ParamKey> = self
            .runs
            .iter()
            .map(|run| run_key(run, family))
            .collect();
        ids.into_iter()
            .map(|id| FilterValue::new(id, family))
            .collect()
    }
}
