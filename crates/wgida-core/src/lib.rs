//! # WGIDA Core
//!
//! Aggregation and filtering core for the WGIDA dashboard: a researcher's
//! view over a dataset of distributed global-iceberg detection experiments.
//!
//! A *global iceberg* is an item whose aggregate frequency across all nodes
//! of a distributed stream exceeds a threshold. The dataset holds one
//! [`Run`](model::Run) per simulated experiment, sweeping stream type, size
//! and shift, window length, frequency threshold and node count, with the
//! ground truth and the outcome of four competing detection algorithms
//! attached to each run.
//!
//! ## Pipeline
//!
//! 1. [`store::DatasetStore`] loads the run collection once and answers
//!    distinct-value queries used to populate filter controls.
//! 2. [`filter::FilterEngine`] narrows the collection to the runs matching
//!    the current per-family selections and emits an atomic
//!    [`filter::Snapshot`] on submit.
//! 3. [`aggregate`] computes precision/recall and communication-overhead
//!    summaries over a snapshot; nothing is cached across snapshots.
//! 4. [`series`] shapes the aggregates into numeric chart series keyed by
//!    the stable algorithm and message tags the rendering layer binds to.
//!
//! ## Modules
//!
//! - [`model`]: run records and the closed `Algorithm` / `MessageKind` enums
//! - [`key`]: parameter families, filter keys and display labels
//! - [`store`]: dataset loading and distinct-value queries
//! - [`filter`]: selection state, filtering and snapshots
//! - [`aggregate`]: metric computation over snapshots
//! - [`series`]: chart-series adapter
//! - [`pagination`]: helpers for the run-listing endpoint

pub mod aggregate;
pub mod filter;
pub mod key;
pub mod model;
pub mod pagination;
pub mod series;
pub mod store;

pub use aggregate::{overall_detected, overall_sliding, AggregateContext, PrStat};
pub use filter::{FamilyValues, FilterEngine, Selection, SelectionUpdate, Snapshot};
pub use key::{run_key, Family, FilterValue, ParamKey};
pub use model::{
    AlgoRun, Algorithm, CommCounts, CommStats, GlobalIceberg, MessageKind, MessageTable, PerAlgo,
    Run, RunConfig, SharedRun, StreamInfo,
};
pub use pagination::{PageMeta, PageParams, RunSummary};
pub use store::{DatasetError, DatasetStore};
