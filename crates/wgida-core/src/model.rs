//! Simulation run records and the closed enumerations used to index them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A run shared between the store and snapshots without copying.
///
/// Runs are immutable after load, so snapshots hold `Arc`s into the same
/// allocation the store owns.
pub type SharedRun = Arc<Run>;

/// One experiment execution: a synthetic stream pushed through the
/// distributed detection protocol under a fixed configuration, with the
/// ground truth and every algorithm's outcome attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub stream: StreamInfo,
    pub config: RunConfig,
    /// Ground-truth global icebergs planted in the stream.
    pub generated: Vec<GlobalIceberg>,
    pub van: AlgoRun,
    pub sim: AlgoRun,
    pub spl: AlgoRun,
    pub per: AlgoRun,
}

impl Run {
    /// Result bundle of one algorithm variant.
    pub fn algo(&self, algorithm: Algorithm) -> &AlgoRun {
        match algorithm {
            Algorithm::Vanilla => &self.van,
            Algorithm::Simple => &self.sim,
            Algorithm::Splitter => &self.spl,
            Algorithm::Perfect => &self.per,
        }
    }
}

/// Synthetic input stream descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Generator family, e.g. `"zipf"` or `"uniform"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Total number of items in the stream.
    pub size: f64,
    /// Drift between the seen and the queried distribution.
    pub shift: f64,
}

/// Detection protocol configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Sliding window length.
    pub window: f64,
    /// Global frequency threshold.
    pub threshold: i64,
    /// Number of distributed nodes.
    pub nodes: i64,
}

/// A heavy-hitter item. Two detections refer to the same iceberg iff their
/// `value`s are equal; object identity never matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalIceberg {
    pub value: String,
    /// Aggregate frequency at detection time, when the simulator reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

/// Per-algorithm outcome of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgoRun {
    /// Self-reported precision over sliding windows.
    pub precision: f64,
    /// Self-reported recall over sliding windows.
    pub recall: f64,
    /// Icebergs the algorithm flagged during the run.
    pub detected: Vec<GlobalIceberg>,
    #[serde(default)]
    pub comm: CommStats,
}

/// Message and payload counts, raw and normalized by stream size.
///
/// The `weighted` side is the raw count divided by the stream size, computed
/// by the simulator itself so runs of different sizes compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommStats {
    pub raw: CommCounts,
    pub weighted: CommCounts,
}

/// Per-message-kind counters for one statistic flavor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommCounts {
    pub messages: MessageTable,
    pub payloads: MessageTable,
}

/// One number per protocol message kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTable {
    pub identify: f64,
    pub freq_req: f64,
    pub freq_rep: f64,
    pub verify: f64,
    pub active_gi: f64,
}

impl MessageTable {
    pub fn get(&self, kind: MessageKind) -> f64 {
        match kind {
            MessageKind::Identify => self.identify,
            MessageKind::FreqReq => self.freq_req,
            MessageKind::FreqRep => self.freq_rep,
            MessageKind::Verify => self.verify,
            MessageKind::ActiveGi => self.active_gi,
        }
    }

    pub fn get_mut(&mut self, kind: MessageKind) -> &mut f64 {
        match kind {
            MessageKind::Identify => &mut self.identify,
            MessageKind::FreqReq => &mut self.freq_req,
            MessageKind::FreqRep => &mut self.freq_rep,
            MessageKind::Verify => &mut self.verify,
            MessageKind::ActiveGi => &mut self.active_gi,
        }
    }

    /// Total traffic across all five message kinds.
    pub fn total(&self) -> f64 {
        MessageKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }
}

/// The four detection strategies compared by the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Baseline protocol.
    #[serde(rename = "van")]
    Vanilla,
    /// Simplified coordination variant.
    #[serde(rename = "sim")]
    Simple,
    /// Stream-splitting variant.
    #[serde(rename = "spl")]
    Splitter,
    /// Oracle with perfect knowledge, the upper bound.
    #[serde(rename = "per")]
    Perfect,
}

impl Algorithm {
    /// Chart category order: Vanilla, Simple, Splitter, Perfect.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Vanilla,
        Algorithm::Simple,
        Algorithm::Splitter,
        Algorithm::Perfect,
    ];

    /// Stable series tag, matching the dataset's field names.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Vanilla => "van",
            Algorithm::Simple => "sim",
            Algorithm::Splitter => "spl",
            Algorithm::Perfect => "per",
        }
    }

    /// Human-readable name used for chart categories.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Vanilla => "Vanilla",
            Algorithm::Simple => "Simple",
            Algorithm::Splitter => "Splitter",
            Algorithm::Perfect => "Perfect",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The five protocol message kinds whose traffic the experiment accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    #[serde(rename = "identify")]
    Identify,
    #[serde(rename = "freq_req")]
    FreqReq,
    #[serde(rename = "freq_rep")]
    FreqRep,
    #[serde(rename = "verify")]
    Verify,
    #[serde(rename = "active_gi")]
    ActiveGi,
}

impl MessageKind {
    pub const ALL: [MessageKind; 5] = [
        MessageKind::Identify,
        MessageKind::FreqReq,
        MessageKind::FreqRep,
        MessageKind::Verify,
        MessageKind::ActiveGi,
    ];

    /// Stable series tag, matching the dataset's field names.
    pub fn tag(self) -> &'static str {
        match self {
            MessageKind::Identify => "identify",
            MessageKind::FreqReq => "freq_req",
            MessageKind::FreqRep => "freq_rep",
            MessageKind::Verify => "verify",
            MessageKind::ActiveGi => "active_gi",
        }
    }

    /// Human-readable name used for chart legends.
    pub fn label(self) -> &'static str {
        match self {
            MessageKind::Identify => "Identify",
            MessageKind::FreqReq => "FreqReq",
            MessageKind::FreqRep => "FreqRep",
            MessageKind::Verify => "Verify",
            MessageKind::ActiveGi => "ActiveGI",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A value for every algorithm variant, serialized under the variant tags.
///
/// Replaces stringly-keyed `data[alg]` lookups with a closed mapping, so a
/// missing algorithm is a compile error rather than an `undefined` at render
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerAlgo<T> {
    pub van: T,
    pub sim: T,
    pub spl: T,
    pub per: T,
}

impl<T> PerAlgo<T> {
    /// Build by evaluating `f` once per algorithm.
    pub fn from_fn(mut f: impl FnMut(Algorithm) -> T) -> Self {
        Self {
            van: f(Algorithm::Vanilla),
            sim: f(Algorithm::Simple),
            spl: f(Algorithm::Splitter),
            per: f(Algorithm::Perfect),
        }
    }

    pub fn get(&self, algorithm: Algorithm) -> &T {
        match algorithm {
            Algorithm::Vanilla => &self.van,
            Algorithm::Simple => &self.sim,
            Algorithm::Splitter => &self.spl,
            Algorithm::Perfect => &self.per,
        }
    }

    pub fn get_mut(&mut self, algorithm: Algorithm) -> &mut T {
        match algorithm {
            Algorithm::Vanilla => &mut self.van,
            Algorithm::Simple => &mut self.sim,
            Algorithm::Splitter => &mut self.spl,
            Algorithm::Perfect => &mut self.per,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerAlgo<U> {
        PerAlgo {
            van: f(&self.van),
            sim: f(&self.sim),
            spl: f(&self.spl),
            per: f(&self.per),
        }
    }
}
