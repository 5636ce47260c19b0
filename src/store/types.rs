use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CompileError;

/// Identity of a quantity being modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
}

/// How a guesstimate's `expression` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GuessKind {
    Function,
    Lognormal,
    Normal,
    Uniform,
    Point,
    Data,
}

impl GuessKind {
    /// Kinds whose expression is a `[low, high]` or `low to high` range.
    pub fn is_distribution(self) -> bool {
        matches!(self, GuessKind::Uniform | GuessKind::Normal | GuessKind::Lognormal)
    }
}

impl fmt::Display for GuessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GuessKind::Function => "FUNCTION",
            GuessKind::Lognormal => "LOGNORMAL",
            GuessKind::Normal => "NORMAL",
            GuessKind::Uniform => "UNIFORM",
            GuessKind::Point => "POINT",
            GuessKind::Data => "DATA",
        };
        f.write_str(s)
    }
}

/// The probabilistic definition attached to a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guesstimate {
    /// Foreign key into `Metric::id`.
    pub metric: String,
    #[serde(rename = "guesstimateType")]
    pub kind: GuessKind,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub guesstimates: Vec<Guesstimate>,
}

/// One model as served by the Guesstimate API: the graph plus the URL it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuesstimateData {
    pub url: String,
    pub graph: Graph,
}

impl GuesstimateData {
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        serde_json::from_str(json).map_err(|e| CompileError::InvalidInput(e.to_string()))
    }
}

/// A metric merged with its guesstimate, carrying a unique code identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// The metric id; also the node's key in the dependency map.
    pub id: String,
    /// Sanitized, unique identifier used in generated code.
    pub name: String,
    /// The metric's original display name.
    pub label: String,
    pub kind: GuessKind,
    pub expression: Option<String>,
    pub description: Option<String>,
    pub data: Option<Vec<f64>>,
}

/// A node after translation, ready for `Backend::render_assignment`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    pub id: String,
    pub name: String,
    /// Documented in the emitted comment instead of the free-text description.
    pub label: String,
    pub kind: GuessKind,
    /// Backend code for the right-hand side of the assignment.
    pub code: String,
}
