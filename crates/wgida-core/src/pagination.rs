//! Pagination helpers for the run-listing endpoint.

use crate::model::{PerAlgo, Run};
use serde::{Deserialize, Serialize};

/// Default number of runs per page.
pub const DEFAULT_LIMIT: usize = 50;

/// Maximum allowed runs per page.
pub const MAX_LIMIT: usize = 500;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Pagination metadata included in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl PageParams {
    /// Effective limit, clamped to [`MAX_LIMIT`].
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Apply pagination to a collected vector, returning the page and its
    /// metadata.
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PageMeta) {
        let total = items.len();
        let limit = self.effective_limit();
        let offset = self.effective_offset();
        let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + limit < total;
        (
            page,
            PageMeta {
                total,
                limit,
                offset,
                has_more,
            },
        )
    }
}

/// One row of the run listing: the run's parameters, the ground-truth size
/// and each algorithm's detection count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub stream: String,
    pub size: f64,
    pub shift: f64,
    pub window: f64,
    pub threshold: i64,
    pub nodes: i64,
    pub generated: usize,
    pub detected: PerAlgo<usize>,
}

impl RunSummary {
    pub fn of(run: &Run) -> Self {
        Self {
            stream: run.stream.kind.clone(),
            size: run.stream.size,
            shift: run.stream.shift,
            window: run.config.window,
            threshold: run.config.threshold,
            nodes: run.config.nodes,
            generated: run.generated.len(),
            detected: PerAlgo::from_fn(|algorithm| run.algo(algorithm).detected.len()),
        }
    }
}
