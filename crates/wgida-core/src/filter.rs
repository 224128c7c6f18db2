//! Selection state, filtering and snapshots.

use crate::key::{run_key, Family, FilterValue, ParamKey};
use crate::model::SharedRun;
use crate::store::DatasetStore;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::array;
use std::collections::BTreeSet;

/// Selected value sets, one per family.
///
/// Every edit replaces a family's whole set, so no selection value is ever
/// shared or mutated in place. An empty family set is a legitimate state and
/// filters everything out; there is no select-all fallback.
#[derive(Debug, Clone)]
pub struct Selection {
    sets: [FxHashSet<ParamKey>; 6],
}

impl Selection {
    /// An empty selection: every family filters everything out.
    pub fn empty() -> Self {
        Self {
            sets: array::from_fn(|_| FxHashSet::default()),
        }
    }

    /// The default selection: every value observed in the store.
    pub fn all_of(store: &DatasetStore) -> Self {
        let mut selection = Self::empty();
        for family in Family::ALL {
            selection.sets[family.index()] = store
                .runs()
                .iter()
                .map(|run| run_key(run, family))
                .collect();
        }
        selection
    }

    pub fn family(&self, family: Family) -> &FxHashSet<ParamKey> {
        &self.sets[family.index()]
    }

    /// Replace one family's selected set wholesale.
    pub fn set(&mut self, family: Family, values: impl IntoIterator<Item = ParamKey>) {
        self.sets[family.index()] = values.into_iter().collect();
    }

    /// A run matches iff each of its six parameter values belongs to the
    /// corresponding selected set: AND across families, OR within a family.
    pub fn matches(&self, run: &crate::model::Run) -> bool {
        Family::ALL
            .iter()
            .all(|&family| self.sets[family.index()].contains(&run_key(run, family)))
    }
}

/// A partial selection edit, one optional value list per family.
///
/// Families left out of the update keep their current sets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelectionUpdate {
    pub streams: Option<Vec<ParamKey>>,
    pub sizes: Option<Vec<ParamKey>>,
    pub shifts: Option<Vec<ParamKey>>,
    pub windows: Option<Vec<ParamKey>>,
    pub thresholds: Option<Vec<ParamKey>>,
    pub nodes: Option<Vec<ParamKey>>,
}

impl SelectionUpdate {
    fn family(&self, family: Family) -> Option<&Vec<ParamKey>> {
        match family {
            Family::Stream => self.streams.as_ref(),
            Family::Size => self.sizes.as_ref(),
            Family::Shift => self.shifts.as_ref(),
            Family::Window => self.windows.as_ref(),
            Family::Threshold => self.thresholds.as_ref(),
            Family::Nodes => self.nodes.as_ref(),
        }
    }
}

/// Per-family value lists, always sorted ascending by id.
///
/// Used both for the values available in a store (to populate controls) and
/// for the values active in a snapshot (to lay out chart axes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyValues {
    pub streams: Vec<FilterValue>,
    pub sizes: Vec<FilterValue>,
    pub shifts: Vec<FilterValue>,
    pub windows: Vec<FilterValue>,
    pub thresholds: Vec<FilterValue>,
    pub nodes: Vec<FilterValue>,
}

impl FamilyValues {
    pub fn from_fn(mut f: impl FnMut(Family) -> Vec<FilterValue>) -> Self {
        Self {
            streams: f(Family::Stream),
            sizes: f(Family::Size),
            shifts: f(Family::Shift),
            windows: f(Family::Window),
            thresholds: f(Family::Threshold),
            nodes: f(Family::Nodes),
        }
    }

    /// All values observed in the store, per family.
    pub fn available(store: &DatasetStore) -> Self {
        Self::from_fn(|family| store.distinct_values(family))
    }

    pub fn family(&self, family: Family) -> &[FilterValue] {
        match family {
            Family::Stream => &self.streams,
            Family::Size => &self.sizes,
            Family::Shift => &self.shifts,
            Family::Window => &self.windows,
            Family::Threshold => &self.thresholds,
            Family::Nodes => &self.nodes,
        }
    }
}

/// One atomic filter result: the matching runs plus the filter values that
/// were in force, emitted together so no view ever sees a half-updated pair.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub runs: Vec<SharedRun>,
    pub filters: FamilyValues,
}

/// Applies the current selection to the run collection and emits snapshots.
///
/// Recomputation is never triggered implicitly by an edit; callers decide
/// when to [`submit`](FilterEngine::submit). The original UI debounced this
/// behind a timer, which is a presentation concern, not a semantic one.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    store: DatasetStore,
    selection: Selection,
}

impl FilterEngine {
    /// New engine with everything selected.
    pub fn new(store: DatasetStore) -> Self {
        let selection = Selection::all_of(&store);
        Self { store, selection }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace one family's selected values.
    pub fn set_selection(&mut self, family: Family, values: Vec<ParamKey>) {
        self.selection.set(family, values);
    }

    /// Apply a partial update across families.
    pub fn apply(&mut self, update: &SelectionUpdate) {
        for family in Family::ALL {
            if let Some(values) = update.family(family) {
                self.selection.set(family, values.iter().cloned());
            }
        }
    }

    /// Runs matching the current selection, in dataset order.
    pub fn filtered_runs(&self) -> Vec<SharedRun> {
        self.store
            .runs()
            .iter()
            .filter(|run| self.selection.matches(run))
            .cloned()
            .collect()
    }

    /// The currently selected values, sorted ascending by id per family.
    pub fn selected_values(&self) -> FamilyValues {
        FamilyValues::from_fn(|family| {
            let ids: BTreeSet<&ParamKey> = self.selection.family(family).iter().collect();
            ids.into_iter()
                .map(|id| FilterValue::new(id.clone(), family))
                .collect()
        })
    }

    /// Take one atomic snapshot of the filtered runs and the active filters.
    pub fn submit(&self) -> Snapshot {
        Snapshot {
            runs: self.filtered_runs(),
            filters: self.selected_values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlgoRun, CommStats, GlobalIceberg, Run, RunConfig, StreamInfo};

    fn algo() -> AlgoRun {
        AlgoRun {
            precision: 0.5,
            recall: 0.5,
            detected: Vec::new(),
            comm: CommStats::default(),
        }
    }

    fn run(kind: &str, shift: f64, window: f64, threshold: i64) -> Run {
        Run {
            stream: StreamInfo {
                kind: kind.to_string(),
                size: 1000.0,
                shift,
            },
            config: RunConfig {
                window,
                threshold,
                nodes: 4,
            },
            generated: vec![GlobalIceberg {
                value: "a".to_string(),
                frequency: None,
            }],
            van: algo(),
            sim: algo(),
            spl: algo(),
            per: algo(),
        }
    }

    fn store() -> DatasetStore {
        DatasetStore::new(vec![
            run("zipf", 0.25, 5.0, 10),
            run("zipf", 0.5, 5.0, 100),
            run("uniform", 0.25, 10.0, 10),
        ])
    }

    #[test]
    fn default_selection_keeps_every_run() {
        let engine = FilterEngine::new(store());
        assert_eq!(engine.filtered_runs().len(), 3);
    }

    #[test]
    fn filtered_runs_is_a_subset_with_exact_membership() {
        let mut engine = FilterEngine::new(store());
        engine.set_selection(Family::Shift, vec![ParamKey::Num(0.25)]);

        let filtered = engine.filtered_runs();
        assert_eq!(filtered.len(), 2);
        for run in &filtered {
            assert_eq!(run.stream.shift, 0.25);
            // Membership in every family, not just the edited one.
            assert!(engine.selection().matches(run));
        }
    }

    #[test]
    fn and_across_families_or_within_family() {
        let mut engine = FilterEngine::new(store());
        engine.set_selection(
            Family::Threshold,
            vec![ParamKey::Num(10.0), ParamKey::Num(100.0)],
        );
        assert_eq!(engine.filtered_runs().len(), 3);

        engine.set_selection(Family::Stream, vec![ParamKey::from("zipf")]);
        assert_eq!(engine.filtered_runs().len(), 2);

        engine.set_selection(Family::Threshold, vec![ParamKey::Num(100.0)]);
        assert_eq!(engine.filtered_runs().len(), 1);
    }

    #[test]
    fn empty_family_yields_empty_result() {
        let mut engine = FilterEngine::new(store());
        engine.set_selection(Family::Window, Vec::new());
        assert!(engine.filtered_runs().is_empty());
    }

    #[test]
    fn snapshot_filters_are_sorted_ascending() {
        let mut engine = FilterEngine::new(store());
        // Deliberately unsorted input.
        engine.set_selection(
            Family::Shift,
            vec![ParamKey::Num(0.5), ParamKey::Num(0.25)],
        );
        let snapshot = engine.submit();
        let ids: Vec<f64> = snapshot
            .filters
            .shifts
            .iter()
            .filter_map(|v| v.id.as_f64())
            .collect();
        assert_eq!(ids, vec![0.25, 0.5]);
    }

    #[test]
    fn apply_touches_only_named_families() {
        let mut engine = FilterEngine::new(store());
        let update = SelectionUpdate {
            streams: Some(vec![ParamKey::from("uniform")]),
            ..SelectionUpdate::default()
        };
        engine.apply(&update);
        assert_eq!(engine.filtered_runs().len(), 1);
        // Untouched families still carry every observed value.
        assert_eq!(engine.selection().family(Family::Threshold).len(), 2);
    }

    #[test]
    fn selection_update_parses_from_json() {
        let update: SelectionUpdate = serde_json::from_str(
            r#"{ "streams": ["zipf"], "thresholds": [10, 100] }"#,
        )
        .unwrap();
        assert_eq!(update.streams.as_deref(), Some(&[ParamKey::from("zipf")][..]));
        assert_eq!(update.thresholds.as_ref().map(Vec::len), Some(2));
        assert!(update.windows.is_none());
    }

    #[test]
    fn submit_is_atomic_and_repeatable() {
        let mut engine = FilterEngine::new(store());
        engine.set_selection(Family::Stream, vec![ParamKey::from("zipf")]);
        let first = engine.submit();
        let second = engine.submit();
        assert_eq!(first.runs.len(), second.runs.len());
        assert_eq!(first.filters, second.filters);
    }
}
