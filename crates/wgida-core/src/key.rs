//! Parameter families, filter keys and display labels.

use crate::model::Run;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The six filterable parameter families of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Stream,
    Size,
    Shift,
    Window,
    Threshold,
    Nodes,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::Stream,
        Family::Size,
        Family::Shift,
        Family::Window,
        Family::Threshold,
        Family::Nodes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Family::Stream => "stream",
            Family::Size => "size",
            Family::Shift => "shift",
            Family::Window => "window",
            Family::Threshold => "threshold",
            Family::Nodes => "nodes",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Family::Stream => 0,
            Family::Size => 1,
            Family::Shift => 2,
            Family::Window => 3,
            Family::Threshold => 4,
            Family::Nodes => 5,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of one distinct parameter value.
///
/// Text for stream types, numeric for everything else. Numbers order and
/// hash through their IEEE bit patterns (`total_cmp` / `to_bits`), so keys
/// can live in ordered and hashed collections without a NaN footgun.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Text(String),
    Num(f64),
}

impl ParamKey {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamKey::Num(n) => Some(*n),
            ParamKey::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamKey::Text(s) => Some(s),
            ParamKey::Num(_) => None,
        }
    }

    /// Display label under the given family's formatting rules: stream types
    /// pass through, thresholds and node counts print as integers, the other
    /// numeric families keep two significant digits.
    pub fn label_for(&self, family: Family) -> String {
        match (self, family) {
            (ParamKey::Text(s), _) => s.clone(),
            (ParamKey::Num(n), Family::Threshold | Family::Nodes) => {
                format!("{}", *n as i64)
            }
            (ParamKey::Num(n), _) => sig2(*n),
        }
    }
}

impl From<&str> for ParamKey {
    fn from(s: &str) -> Self {
        ParamKey::Text(s.to_string())
    }
}

impl From<f64> for ParamKey {
    fn from(n: f64) -> Self {
        ParamKey::Num(n)
    }
}

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParamKey {}

impl Ord for ParamKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ParamKey::Text(a), ParamKey::Text(b)) => a.cmp(b),
            (ParamKey::Num(a), ParamKey::Num(b)) => a.total_cmp(b),
            (ParamKey::Text(_), ParamKey::Num(_)) => Ordering::Less,
            (ParamKey::Num(_), ParamKey::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ParamKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ParamKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ParamKey::Text(s) => {
                state.write_u8(0);
                s.hash(state);
            }
            ParamKey::Num(n) => {
                state.write_u8(1);
                n.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Text(s) => f.write_str(s),
            ParamKey::Num(n) => write!(f, "{n}"),
        }
    }
}

/// A distinct parameter value paired with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    pub id: ParamKey,
    pub label: String,
}

impl FilterValue {
    pub fn new(id: ParamKey, family: Family) -> Self {
        let label = id.label_for(family);
        Self { id, label }
    }
}

/// The run's key in the given family.
pub fn run_key(run: &Run, family: Family) -> ParamKey {
    match family {
        Family::Stream => ParamKey::Text(run.stream.kind.clone()),
        Family::Size => ParamKey::Num(run.stream.size),
        Family::Shift => ParamKey::Num(run.stream.shift),
        Family::Window => ParamKey::Num(run.config.window),
        Family::Threshold => ParamKey::Num(run.config.threshold as f64),
        Family::Nodes => ParamKey::Num(run.config.nodes as f64),
    }
}

/// Round to two significant digits and print the shortest representation.
///
/// Scaling happens with exact positive powers of ten (or plain decimal
/// formatting below 10), so labels never pick up float artifacts like
/// `119999.99999999999`.
fn sig2(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let magnitude = v.abs().log10().floor() as i32;
    if magnitude >= 1 {
        let scale = 10f64.powi(magnitude - 1);
        let rounded = (v / scale).round() * scale;
        format!("{rounded}")
    } else {
        let decimals = (1 - magnitude) as usize;
        let formatted = format!("{v:.decimals$}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
