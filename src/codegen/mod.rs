//! The graph-to-code pipeline.
//!
//! normalize -> extract dependencies -> order -> translate -> emit.
//! Every compilation builds its own registry and dependency map, so a
//! `Compiler` can be shared freely between threads.

pub mod batch;
pub mod emit;

pub use batch::compile_batch;

use crate::analysis::references::resolve_references;
use crate::analysis::sanitize::SanitizerConfig;
use crate::analysis::shape::parse_range;
use crate::analysis::topology::{self, DependencyMap};
use crate::backend::{Backend, Python, Squiggle};
use crate::error::{CompileError, Diagnostic};
use crate::store::{GraphNode, GuessKind, GuesstimateData, NodeRegistry, RenderedNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub sanitizer: SanitizerConfig,
    /// Fail on the first `${metric:<id>}` that points at no node instead of
    /// emitting the token verbatim.
    pub strict_references: bool,
}

/// Generated source plus the non-fatal findings collected on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Compiler<'a, B: Backend + ?Sized> {
    backend: &'a B,
    options: &'a CompileOptions,
}

impl<'a, B: Backend + ?Sized> Compiler<'a, B> {
    pub fn new(backend: &'a B, options: &'a CompileOptions) -> Self {
        Self { backend, options }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(url = %data.url))]
    pub fn compile(&self, data: &GuesstimateData) -> Result<Compilation, CompileError> {
        let registry = NodeRegistry::build(&data.graph, &self.options.sanitizer)?;
        let mut diagnostics = Vec::new();

        let (deps, bodies) = self.extract_dependencies(&registry, &mut diagnostics)?;
        let order = topology::sort(&deps)?;

        let rendered: HashMap<&str, RenderedNode> = registry
            .iter()
            .map(|node| {
                let body = bodies.get(node.id.as_str()).map(String::as_str);
                (node.id.as_str(), self.translate(node, body, &mut diagnostics))
            })
            .collect();

        let body = emit::emit(self.backend, order.iter().filter_map(|id| rendered.get(id.as_str())));
        debug!(
            nodes = registry.count(),
            edges = deps.edge_count(),
            lines = rendered.values().filter(|n| !n.code.is_empty()).count(),
            "compiled graph"
        );

        let mut code = self.backend.header(&data.url);
        code.push_str(&body);
        Ok(Compilation { code, diagnostics })
    }

    /// Builds the dependency map and the rewritten body of every FUNCTION node.
    ///
    /// Edges follow node input order rather than their order in the text.
    fn extract_dependencies<'r>(
        &self,
        registry: &'r NodeRegistry,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(DependencyMap, HashMap<&'r str, String>), CompileError> {
        let names = registry.name_table();
        let mut deps = DependencyMap::new();
        let mut bodies = HashMap::new();

        for node in registry.iter() {
            deps.insert(&node.id);
            if node.kind != GuessKind::Function {
                continue;
            }

            let resolved = resolve_references(strip_sentinel(node.expression.as_deref().unwrap_or("")), &names);
            for target in resolved.dangling {
                if self.options.strict_references {
                    return Err(CompileError::DanglingReference { node: node.id.clone(), target });
                }
                warn!(node = %node.id, %target, "reference to unknown metric left in output");
                diagnostics.push(Diagnostic::DanglingReference { id: node.id.clone(), target });
            }

            let mut edges = resolved.edges;
            edges.sort_by_key(|id| registry.position(id));
            for target in &edges {
                deps.add_edge(&node.id, target);
            }
            bodies.insert(node.id.as_str(), resolved.text);
        }

        Ok((deps, bodies))
    }

    fn translate(&self, node: &GraphNode, body: Option<&str>, diagnostics: &mut Vec<Diagnostic>) -> RenderedNode {
        let b = self.backend;
        let code = match node.kind {
            GuessKind::Point => node.expression.as_deref().map(|v| b.point(v)),
            GuessKind::Data => match &node.data {
                Some(samples) => Some(b.data(samples)),
                None => {
                    warn!(node = %node.id, "DATA node has no samples");
                    diagnostics.push(Diagnostic::MissingData { id: node.id.clone() });
                    None
                }
            },
            kind if kind.is_distribution() => {
                let expression = node.expression.as_deref().unwrap_or("");
                match parse_range(expression) {
                    Some((low, high)) => Some(match node.kind {
                        GuessKind::Uniform => b.uniform(low, high),
                        GuessKind::Normal => b.normal(low, high),
                        _ => b.lognormal(low, high),
                    }),
                    None => {
                        if node.expression.is_some() {
                            diagnostics.push(Diagnostic::UnparsableDistributionShape {
                                id: node.id.clone(),
                                kind: node.kind,
                                expression: expression.to_string(),
                            });
                        }
                        None
                    }
                }
            }
            GuessKind::Function => body.map(|text| b.function(text)),
            _ => None,
        }
        .unwrap_or_default();

        if code.is_empty() {
            debug!(node = %node.id, kind = %node.kind, "no renderable expression, skipping");
        }

        RenderedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            label: node.label.clone(),
            kind: node.kind,
            code,
        }
    }
}

/// Function bodies carry a one-character marker (`=`) ahead of the formula.
fn strip_sentinel(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.as_str()
}

pub fn compile<B: Backend + ?Sized>(
    data: &GuesstimateData,
    backend: &B,
    options: &CompileOptions,
) -> Result<Compilation, CompileError> {
    Compiler::new(backend, options).compile(data)
}

pub fn squiggle_code(data: &GuesstimateData) -> Result<String, CompileError> {
    compile(data, &Squiggle, &CompileOptions::default()).map(|c| c.code)
}

pub fn python_code(data: &GuesstimateData) -> Result<String, CompileError> {
    compile(data, &Python, &CompileOptions::default()).map(|c| c.code)
}
