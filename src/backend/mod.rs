//! Target-language code generation rules.
//!
//! A backend renders each node kind's parameters into target syntax and
//! turns a translated node into a full statement. The compiler never looks
//! inside the strings a backend produces, so new targets only need a new
//! `Backend` impl.

pub mod python;
pub mod squiggle;

pub use python::Python;
pub use squiggle::Squiggle;

use crate::store::RenderedNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Backend {
    /// Text placed before the first assignment; embeds the model URL.
    fn header(&self, url: &str) -> String;

    fn point(&self, value: &str) -> String;
    fn data(&self, samples: &[f64]) -> String;
    fn uniform(&self, low: &str, high: &str) -> String;
    fn normal(&self, low: &str, high: &str) -> String;
    fn lognormal(&self, low: &str, high: &str) -> String;
    /// `body` already has its references replaced by resolved names.
    fn function(&self, body: &str) -> String;

    fn render_assignment(&self, node: &RenderedNode) -> String;
}

/// Built-in backends, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Squiggle,
    Python,
}

impl Target {
    pub fn backend(self) -> Box<dyn Backend + Send + Sync> {
        match self {
            Target::Squiggle => Box::new(Squiggle),
            Target::Python => Box::new(Python),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Squiggle => f.write_str("squiggle"),
            Target::Python => f.write_str("python"),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squiggle" => Ok(Target::Squiggle),
            "python" => Ok(Target::Python),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

/// Formats samples the way a JSON array literal prints them: no spaces,
/// numbers in JavaScript's shortest form (`1`, `2.5`, `1e+21`, `1e-7`).
pub(crate) fn samples_literal(samples: &[f64]) -> String {
    let items: Vec<String> = samples.iter().map(|&v| json_number(v)).collect();
    format!("[{}]", items.join(","))
}

/// Exponent notation below `1e-6` and from `1e21` up; negative zero prints as `0`.
fn json_number(v: f64) -> String {
    if !v.is_finite() {
        return "null".to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let magnitude = v.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let sci = format!("{:e}", v);
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => sci,
        }
    } else {
        v.to_string()
    }
}
