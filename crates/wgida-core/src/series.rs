//! Chart-series adapter.
//!
//! Shapes the aggregates into plain numeric series keyed by the stable
//! algorithm and message tags (`van`/`sim`/`spl`/`per`, `identify`/...).
//! The rendering sink binds these by id; chart configuration itself is its
//! problem, not ours. Axis categories always come from the ACTIVE filter
//! values of the snapshot, so axes stay stable even when a cell has no data.

use crate::aggregate::{AggregateContext, PrStat};
use crate::filter::FamilyValues;
use crate::model::{Algorithm, CommCounts, MessageKind, MessageTable, PerAlgo};
use serde::{Deserialize, Serialize};

/// One column series: one value per algorithm, ordered van, sim, spl, per.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSeries {
    pub id: String,
    pub data: Vec<f64>,
}

/// Precision and recall columns over the four algorithm categories.
pub fn pr_columns(stats: &PerAlgo<PrStat>) -> Vec<ColumnSeries> {
    vec![
        ColumnSeries {
            id: "precision".to_string(),
            data: Algorithm::ALL
                .iter()
                .map(|&a| stats.get(a).precision)
                .collect(),
        },
        ColumnSeries {
            id: "recall".to_string(),
            data: Algorithm::ALL.iter().map(|&a| stats.get(a).recall).collect(),
        },
    ]
}

/// Stacked message and payload columns, one series per message kind, values
/// scaled to percent of the stream size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommColumns {
    pub messages: Vec<ColumnSeries>,
    pub payloads: Vec<ColumnSeries>,
}

pub fn comm_columns(ctx: &AggregateContext) -> CommColumns {
    let comm = ctx.communication();
    let stack = |pick: fn(&CommCounts) -> &MessageTable| -> Vec<ColumnSeries> {
        MessageKind::ALL
            .iter()
            .map(|&kind| ColumnSeries {
                id: kind.tag().to_string(),
                data: Algorithm::ALL
                    .iter()
                    .map(|&a| pick(comm.get(a)).get(kind) * 100.0)
                    .collect(),
            })
            .collect()
    };
    CommColumns {
        messages: stack(|counts| &counts.messages),
        payloads: stack(|counts| &counts.payloads),
    }
}

/// Heatmap cells per algorithm as `[x, y, value]` triples over the active
/// filter categories. Cells without matching runs are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapGrid {
    pub x_title: String,
    pub x_categories: Vec<String>,
    pub y_title: String,
    pub y_categories: Vec<String>,
    pub precision: PerAlgo<Vec<[f64; 3]>>,
    pub recall: PerAlgo<Vec<[f64; 3]>>,
}

/// Shift × window precision/recall heatmap.
pub fn shift_window_heatmap(ctx: &AggregateContext, filters: &FamilyValues) -> HeatmapGrid {
    heatmap(
        "Shifts",
        &filters.shifts,
        "Windows",
        &filters.windows,
        |shift, window| ctx.shift_window_pr(shift, window),
    )
}

/// Window × threshold precision/recall heatmap.
pub fn window_threshold_heatmap(ctx: &AggregateContext, filters: &FamilyValues) -> HeatmapGrid {
    heatmap(
        "Windows",
        &filters.windows,
        "Thresholds",
        &filters.thresholds,
        |window, threshold| ctx.window_threshold_pr(window, threshold),
    )
}

fn heatmap<'a>(
    x_title: &str,
    x_values: &'a [crate::key::FilterValue],
    y_title: &str,
    y_values: &'a [crate::key::FilterValue],
    cell: impl Fn(&crate::key::ParamKey, &crate::key::ParamKey) -> Option<&'a PerAlgo<PrStat>>,
) -> HeatmapGrid {
    let mut precision: PerAlgo<Vec<[f64; 3]>> = PerAlgo::from_fn(|_| Vec::new());
    let mut recall: PerAlgo<Vec<[f64; 3]>> = PerAlgo::from_fn(|_| Vec::new());

    for (x, x_value) in x_values.iter().enumerate() {
        for (y, y_value) in y_values.iter().enumerate() {
            let Some(stats) = cell(&x_value.id, &y_value.id) else {
                continue;
            };
            for algorithm in Algorithm::ALL {
                let stat = stats.get(algorithm);
                precision
                    .get_mut(algorithm)
                    .push([x as f64, y as f64, stat.precision]);
                recall
                    .get_mut(algorithm)
                    .push([x as f64, y as f64, stat.recall]);
            }
        }
    }

    HeatmapGrid {
        x_title: x_title.to_string(),
        x_categories: x_values.iter().map(|v| v.label.clone()).collect(),
        y_title: y_title.to_string(),
        y_categories: y_values.iter().map(|v| v.label.clone()).collect(),
        precision,
        recall,
    }
}

/// Stacked-area data over one family's active values: per algorithm, one
/// value per category. Categories with no matching runs carry NaN so the
/// series stays aligned with the axis (the sink renders a gap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedAreaGrid {
    pub x_title: String,
    pub x_categories: Vec<String>,
    pub data: PerAlgo<Vec<f64>>,
}

/// Mean total weighted traffic per active threshold value.
pub fn threshold_stacked_area(ctx: &AggregateContext, filters: &FamilyValues) -> StackedAreaGrid {
    stacked_area("Thresholds", &filters.thresholds, |key| {
        ctx.threshold_comm(key)
    })
}

/// Mean total weighted traffic per active window value.
pub fn window_stacked_area(ctx: &AggregateContext, filters: &FamilyValues) -> StackedAreaGrid {
    stacked_area("Windows", &filters.windows, |key| ctx.window_comm(key))
}

fn stacked_area<'a>(
    x_title: &str,
    values: &'a [crate::key::FilterValue],
    lookup: impl Fn(&crate::key::ParamKey) -> Option<&'a PerAlgo<f64>>,
) -> StackedAreaGrid {
    let mut data: PerAlgo<Vec<f64>> = PerAlgo::from_fn(|_| Vec::new());
    for value in values {
        match lookup(&value.id) {
            Some(stats) => {
                for algorithm in Algorithm::ALL {
                    data.get_mut(algorithm).push(*stats.get(algorithm));
                }
            }
            None => {
                for algorithm in Algorithm::ALL {
                    data.get_mut(algorithm).push(f64::NAN);
                }
            }
        }
    }
    StackedAreaGrid {
        x_title: x_title.to_string(),
        x_categories: values.iter().map(|v| v.label.clone()).collect(),
        data,
    }
}
