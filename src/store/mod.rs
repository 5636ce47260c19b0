//! Input records and their normalized graph nodes.
pub mod registry;
pub mod types;

pub use registry::NodeRegistry;
pub use types::{GraphNode, Graph, GuessKind, Guesstimate, GuesstimateData, Metric, RenderedNode};
