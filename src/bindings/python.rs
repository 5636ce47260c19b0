use crate::codegen;
use crate::error::CompileError;
use crate::store::GuesstimateData;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(e: CompileError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Compiles a Guesstimate API payload (JSON text) into a Squiggle script.
#[pyfunction]
pub fn squiggle_code(json: &str) -> PyResult<String> {
    let data = GuesstimateData::from_json(json).map_err(to_py_err)?;
    codegen::squiggle_code(&data).map_err(to_py_err)
}

/// Compiles a Guesstimate API payload (JSON text) into a numpy script.
#[pyfunction]
pub fn python_code(json: &str) -> PyResult<String> {
    let data = GuesstimateData::from_json(json).map_err(to_py_err)?;
    codegen::python_code(&data).map_err(to_py_err)
}
