use super::types::*;
use crate::analysis::sanitize::{unique_name, SanitizerConfig};
use crate::error::CompileError;
use std::collections::{HashMap, HashSet};

/// The normalized node set of one compilation.
///
/// Nodes are keyed by metric id and kept in input order. A registry is built
/// fresh for every compilation and never shared.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,

    // Names handed out so far, including those of replaced nodes.
    used_names: HashSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn count(&self) -> usize { self.nodes.len() }

    /// Merges every guesstimate with its metric, in input order.
    pub fn build(graph: &Graph, config: &SanitizerConfig) -> Result<Self, CompileError> {
        let metrics: HashMap<&str, &Metric> =
            graph.metrics.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut registry = Self::new();
        for guess in &graph.guesstimates {
            let metric = metrics
                .get(guess.metric.as_str())
                .ok_or_else(|| CompileError::MissingMetric { metric: guess.metric.clone() })?;
            registry.add_node(metric, guess, config);
        }
        Ok(registry)
    }

    /// Normalizes one metric/guesstimate pair and assigns it a unique name.
    ///
    /// A second guesstimate for the same metric replaces the first node but
    /// keeps its position.
    pub fn add_node(&mut self, metric: &Metric, guess: &Guesstimate, config: &SanitizerConfig) -> &GraphNode {
        let name = unique_name(&metric.name, &mut self.used_names, config);
        let node = GraphNode {
            id: metric.id.clone(),
            name,
            label: metric.name.clone(),
            kind: guess.kind,
            expression: guess.expression.clone(),
            description: guess.description.clone(),
            data: guess.data.clone(),
        };

        let existing = self.index.get(&metric.id).copied();
        let idx = match existing {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.index.insert(metric.id.clone(), self.nodes.len());
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        &self.nodes[idx]
    }

    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Position of a node in input order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Metric id to resolved name, for reference substitution.
    pub fn name_table(&self) -> HashMap<&str, &str> {
        self.nodes.iter().map(|n| (n.id.as_str(), n.name.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: &str, name: &str) -> Metric {
        Metric { id: id.into(), name: name.into() }
    }

    fn point(metric: &str, expr: &str) -> Guesstimate {
        Guesstimate {
            metric: metric.into(),
            kind: GuessKind::Point,
            expression: Some(expr.into()),
            description: Some("free text".into()),
            data: None,
        }
    }

    #[test]
    fn test_build_assigns_unique_names_in_input_order() {
        let graph = Graph {
            metrics: vec![metric("m1", "Revenue %"), metric("m2", "Revenue %")],
            guesstimates: vec![point("m2", "1"), point("m1", "2")],
        };
        let reg = NodeRegistry::build(&graph, &SanitizerConfig::default()).unwrap();

        assert_eq!(reg.get("m2").unwrap().name, "revenue_perc_");
        assert_eq!(reg.get("m1").unwrap().name, "revenue_perc__2");
        assert_eq!(reg.position("m2"), Some(0));
    }

    #[test]
    fn test_label_keeps_display_name() {
        let graph = Graph { metrics: vec![metric("m1", "Churn Rate")], guesstimates: vec![point("m1", "0.1")] };
        let reg = NodeRegistry::build(&graph, &SanitizerConfig::default()).unwrap();
        let node = reg.get("m1").unwrap();

        assert_eq!(node.label, "Churn Rate");
        assert_eq!(node.name, "churn_rate");
        assert_eq!(node.description.as_deref(), Some("free text"));
    }

    #[test]
    fn test_missing_metric_is_fatal() {
        let graph = Graph { metrics: vec![metric("m1", "a")], guesstimates: vec![point("nope", "1")] };
        let err = NodeRegistry::build(&graph, &SanitizerConfig::default()).unwrap_err();
        assert_eq!(err, CompileError::MissingMetric { metric: "nope".into() });
    }

    #[test]
    fn test_repeated_metric_replaces_in_place() {
        let graph = Graph {
            metrics: vec![metric("m1", "x"), metric("m2", "y")],
            guesstimates: vec![point("m1", "1"), point("m2", "2"), point("m1", "3")],
        };
        let reg = NodeRegistry::build(&graph, &SanitizerConfig::default()).unwrap();

        assert_eq!(reg.count(), 2);
        let first = reg.iter().next().unwrap();
        assert_eq!(first.expression.as_deref(), Some("3"));
        assert_eq!(first.name, "x_2");
    }
}
