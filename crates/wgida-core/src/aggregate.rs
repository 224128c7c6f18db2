//! Metric computation over filtered snapshots.
//!
//! Every function here is a pure function of the runs it is given: calling
//! it twice on the same snapshot yields identical results, and nothing is
//! cached across snapshots. Degenerate statistics never fault — set-based
//! ratios floor their denominators at 1, and the mean of an empty slice is
//! NaN (which serde_json writes as `null`, so the rendering layer shows a
//! gap instead of a fabricated zero).

use crate::filter::Snapshot;
use crate::key::{run_key, Family, ParamKey};
use crate::model::{Algorithm, CommCounts, MessageKind, PerAlgo, Run, SharedRun};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Averaged precision/recall pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrStat {
    pub precision: f64,
    pub recall: f64,
}

/// Arithmetic mean; NaN on empty input.
fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

pub(crate) fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Mean of each run's self-reported sliding-window precision and recall.
pub fn overall_sliding(runs: &[SharedRun]) -> PerAlgo<PrStat> {
    PerAlgo::from_fn(|algorithm| PrStat {
        precision: round3(mean(runs.iter().map(|run| run.algo(algorithm).precision))),
        recall: round3(mean(runs.iter().map(|run| run.algo(algorithm).recall))),
    })
}

/// Precision and recall of one run, recomputed from the detected set against
/// the generated ground truth. Membership is by iceberg value; denominators
/// are floored at 1 so empty sets divide to 0 instead of faulting.
fn detected_pr(run: &Run, algorithm: Algorithm) -> PrStat {
    let generated: FxHashSet<&str> = run
        .generated
        .iter()
        .map(|iceberg| iceberg.value.as_str())
        .collect();
    let detected: FxHashSet<&str> = run
        .algo(algorithm)
        .detected
        .iter()
        .map(|iceberg| iceberg.value.as_str())
        .collect();
    let hits = detected
        .iter()
        .filter(|value| generated.contains(*value))
        .count() as f64;
    PrStat {
        precision: hits / detected.len().max(1) as f64,
        recall: hits / generated.len().max(1) as f64,
    }
}

/// Mean whole-simulation precision/recall, recomputed per run from the
/// detected and generated iceberg sets.
pub fn overall_detected(runs: &[SharedRun]) -> PerAlgo<PrStat> {
    PerAlgo::from_fn(|algorithm| {
        let stats: Vec<PrStat> = runs
            .iter()
            .map(|run| detected_pr(run, algorithm))
            .collect();
        PrStat {
            precision: round3(mean(stats.iter().map(|s| s.precision))),
            recall: round3(mean(stats.iter().map(|s| s.recall))),
        }
    })
}

/// Lookup tables parsed once per snapshot.
///
/// The chart views read from here; a superseding snapshot simply replaces
/// the whole context (last write wins).
#[derive(Debug, Clone, Default)]
pub struct AggregateContext {
    shift_window: IndexMap<(ParamKey, ParamKey), PerAlgo<PrStat>>,
    window_threshold: IndexMap<(ParamKey, ParamKey), PerAlgo<PrStat>>,
    communication: PerAlgo<CommCounts>,
    threshold_comm: IndexMap<ParamKey, PerAlgo<f64>>,
    window_comm: IndexMap<ParamKey, PerAlgo<f64>>,
}

impl AggregateContext {
    pub fn build(snapshot: &Snapshot) -> Self {
        let runs = &snapshot.runs;
        Self {
            shift_window: pr_table(runs, Family::Shift, Family::Window),
            window_threshold: pr_table(runs, Family::Window, Family::Threshold),
            communication: communication_means(runs),
            threshold_comm: comm_table(runs, Family::Threshold),
            window_comm: comm_table(runs, Family::Window),
        }
    }

    /// Cell of the shift × window table; `None` when no filtered run has
    /// that exact coordinate pair.
    pub fn shift_window_pr(
        &self,
        shift: &ParamKey,
        window: &ParamKey,
    ) -> Option<&PerAlgo<PrStat>> {
        self.shift_window.get(&(shift.clone(), window.clone()))
    }

    /// Cell of the window × threshold table.
    pub fn window_threshold_pr(
        &self,
        window: &ParamKey,
        threshold: &ParamKey,
    ) -> Option<&PerAlgo<PrStat>> {
        self.window_threshold.get(&(window.clone(), threshold.clone()))
    }

    /// Mean weighted message and payload fractions per message kind.
    pub fn communication(&self) -> &PerAlgo<CommCounts> {
        &self.communication
    }

    /// Mean total weighted message traffic over runs with this threshold.
    pub fn threshold_comm(&self, threshold: &ParamKey) -> Option<&PerAlgo<f64>> {
        self.threshold_comm.get(threshold)
    }

    /// Mean total weighted message traffic over runs with this window.
    pub fn window_comm(&self, window: &ParamKey) -> Option<&PerAlgo<f64>> {
        self.window_comm.get(window)
    }
}

/// Group runs by a family pair and average the self-reported precision and
/// recall per cell, rounded to two decimals. Cells with no runs are absent.
fn pr_table(
    runs: &[SharedRun],
    row: Family,
    column: Family,
) -> IndexMap<(ParamKey, ParamKey), PerAlgo<PrStat>> {
    let mut groups: IndexMap<(ParamKey, ParamKey), Vec<&SharedRun>> = IndexMap::new();
    for run in runs {
        groups
            .entry((run_key(run, row), run_key(run, column)))
            .or_default()
            .push(run);
    }
    groups
        .into_iter()
        .map(|(cell, members)| {
            let stat = PerAlgo::from_fn(|algorithm| PrStat {
                precision: round2(mean(
                    members.iter().map(|run| run.algo(algorithm).precision),
                )),
                recall: round2(mean(members.iter().map(|run| run.algo(algorithm).recall))),
            });
            (cell, stat)
        })
        .collect()
}

/// Mean weighted communication counters across the runs, per message kind.
fn communication_means(runs: &[SharedRun]) -> PerAlgo<CommCounts> {
    PerAlgo::from_fn(|algorithm| {
        let mut counts = CommCounts::default();
        for kind in MessageKind::ALL {
            *counts.messages.get_mut(kind) = mean(
                runs.iter()
                    .map(|run| run.algo(algorithm).comm.weighted.messages.get(kind)),
            );
            *counts.payloads.get_mut(kind) = mean(
                runs.iter()
                    .map(|run| run.algo(algorithm).comm.weighted.payloads.get(kind)),
            );
        }
        counts
    })
}

/// Mean total weighted message traffic, grouped by one family's value.
fn comm_table(runs: &[SharedRun], family: Family) -> IndexMap<ParamKey, PerAlgo<f64>> {
    let mut groups: IndexMap<ParamKey, Vec<&SharedRun>> = IndexMap::new();
    for run in runs {
        groups.entry(run_key(run, family)).or_default().push(run);
    }
    groups
        .into_iter()
        .map(|(key, members)| {
            let totals = PerAlgo::from_fn(|algorithm| {
                mean(
                    members
                        .iter()
                        .map(|run| run.algo(algorithm).comm.weighted.messages.total()),
                )
            });
            (key, totals)
        })
        .collect()
}
