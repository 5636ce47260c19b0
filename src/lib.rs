//! Compiles Guesstimate models into probabilistic programs.
//!
//! A model is a list of metrics, each with a guesstimate that is either a
//! distribution, a point value, sample data, or a formula over other metrics.
//! The compiler names every metric, orders the graph by its formula
//! references and hands each node to a [`Backend`] for rendering.

pub mod analysis;
pub mod backend;
pub mod codegen;
pub mod error;
pub mod store;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use backend::{Backend, Python, Squiggle, Target};
pub use codegen::{compile, compile_batch, python_code, squiggle_code, Compilation, CompileOptions, Compiler};
pub use error::{CompileError, Diagnostic};
pub use store::{GraphNode, Guesstimate, GuesstimateData, GuessKind, Metric, RenderedNode};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// This function defines the `_core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(bindings::python::squiggle_code, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::python::python_code, m)?)?;
    Ok(())
}
