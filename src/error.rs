//! Failure kinds of a compilation.
//!
//! Fatal problems abort the whole compilation as a `CompileError`. Everything
//! else is reported as a `Diagnostic` next to the generated code, and the
//! offending node is either dropped or emitted as-is.

use crate::store::GuessKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("metric not found: {metric}")]
    MissingMetric { metric: String },
    #[error("broken dependency: '{id}' has no entry in the dependency map")]
    BrokenDependency { id: String },
    #[error("cycle detected involving node '{id}'")]
    CycleDetected { id: String },
    #[error("node '{node}' references unknown metric '{target}'")]
    DanglingReference { node: String, target: String },
    #[error("invalid input graph: {0}")]
    InvalidInput(String),
}

/// A non-fatal finding, reported alongside successful output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A range kind whose text matched neither `[low, high]` nor `low to high`.
    /// The node is left out of the output.
    UnparsableDistributionShape {
        id: String,
        kind: GuessKind,
        expression: String,
    },
    /// A `${metric:<target>}` token with no matching node. The token is emitted verbatim.
    DanglingReference { id: String, target: String },
    /// A DATA node without samples. The node is left out of the output.
    MissingData { id: String },
}

