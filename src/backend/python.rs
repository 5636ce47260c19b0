use super::{samples_literal, Backend};
use crate::store::{GuessKind, RenderedNode};

/// Helpers the generated script relies on. Ranges are read as 5th/95th
/// percentile pairs and sampled a million times.
const PYTHON_RUNTIME: &str = r#"
import numpy as np
import matplotlib.pyplot as plt
from scipy.stats import norm
import inspect

def make_uniform(perc_5, perc_95):
  assert perc_95 > perc_5
  size = (perc_95 - perc_5) / 0.9
  minimum = perc_5 - size * 0.05
  maximum = minimum + size
  return np.random.uniform(minimum, maximum, 1_000_000)

def make_normal(perc_5, perc_95):
  # Copied from https://forum.effectivealtruism.org/posts/tvTqRtMLnJiiuAep5/
  assert perc_95 > perc_5
  mean = (perc_5 + perc_95) / 2
  stdev = (perc_95 - perc_5) / (norm.ppf(0.95) - norm.ppf(0.05))
  return np.random.normal(mean, stdev, 1_000_000)

def make_lognormal(perc_5, perc_95):
  assert perc_5 > 0
  assert perc_95 > 0
  return np.exp(make_normal(np.log(perc_5), np.log(perc_95)))

def show(dist):
  title_lines = []
  frame = inspect.currentframe()
  name = [name for name, val in frame.f_back.f_locals.items() if val is dist]
  if name:
    title_lines.append(name[0])
  title_lines.append(f"mean: {np.mean(dist):,.2f}")
  title_lines.append(f"stdev: {np.std(dist):,.2f}")
  five, ninetyfive = np.quantile(dist,[0.05, 0.95])
  title_lines.append(f"5% — 95%: {five:,.2f} — {ninetyfive:,.2f}")
  plt.title("\n".join(title_lines))
  plt.hist(dist, bins=100)
  plt.show()


"#;

/// Magnitude suffixes; only the first occurrence of each is expanded.
const MAGNITUDES: [(&str, &str); 3] = [
    ("K", " * 1_000"),
    ("M", " * 1_000_000"),
    ("B", " * 1_000_000_000"),
];

/// Function-body rewrites from Guesstimate builtins to numpy.
const FUNCTION_REWRITES: [(&str, &str); 2] = [("min(", "np.minimum("), ("max(", "np.maximum(")];

/// Emits a numpy script with a sampling runtime and a plot per distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

fn expand_magnitude(text: &str) -> String {
    MAGNITUDES
        .iter()
        .fold(text.to_string(), |acc, (suffix, factor)| acc.replacen(suffix, factor, 1))
}

impl Backend for Python {
    fn header(&self, url: &str) -> String {
        format!("\n# Generated from {}\n{}", url, PYTHON_RUNTIME)
    }

    fn point(&self, value: &str) -> String {
        value.to_string()
    }

    fn data(&self, samples: &[f64]) -> String {
        format!("np.array({})", samples_literal(samples))
    }

    fn uniform(&self, low: &str, high: &str) -> String {
        format!("make_uniform({}, {})", expand_magnitude(low), expand_magnitude(high))
    }

    fn normal(&self, low: &str, high: &str) -> String {
        format!("make_normal({}, {})", expand_magnitude(low), expand_magnitude(high))
    }

    fn lognormal(&self, low: &str, high: &str) -> String {
        format!("make_lognormal({}, {})", expand_magnitude(low), expand_magnitude(high))
    }

    fn function(&self, body: &str) -> String {
        FUNCTION_REWRITES
            .iter()
            .fold(body.to_string(), |acc, (from, to)| acc.replace(from, to))
    }

    fn render_assignment(&self, node: &RenderedNode) -> String {
        let mut out = format!("\n# {}\n{} = {}", node.label, node.name, node.code);
        if node.kind != GuessKind::Point {
            out.push_str(&format!("\nshow({})", node.name));
        }
        out
    }
}
