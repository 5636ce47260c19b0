//! Embedded `${metric:<id>}` references inside function bodies.
//!
//! Bodies are treated as opaque text: the only rewrite is token substitution.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static METRIC_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{metric:([^}]*)\}").expect("valid reference pattern"));

/// Result of rewriting one body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    /// Referenced ids that exist in the name table, in order of first appearance.
    pub edges: Vec<String>,
    /// Referenced ids with no entry in the name table, in order of first appearance.
    pub dangling: Vec<String>,
}

/// Replaces every `${metric:<id>}` whose id is in `names` with the resolved
/// name. Unknown ids keep their token verbatim.
pub fn resolve_references(text: &str, names: &HashMap<&str, &str>) -> Resolved {
    let mut edges: Vec<String> = Vec::new();
    let mut dangling: Vec<String> = Vec::new();

    let rewritten = METRIC_REF.replace_all(text, |caps: &Captures| {
        let id = &caps[1];
        match names.get(id) {
            Some(name) => {
                if !edges.iter().any(|e| e == id) {
                    edges.push(id.to_string());
                }
                (*name).to_string()
            }
            None => {
                if !dangling.iter().any(|d| d == id) {
                    dangling.push(id.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    Resolved { text: rewritten.into_owned(), edges, dangling }
}
