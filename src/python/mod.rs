#![allow(clippy::useless_conversion)]

use pyo3::{exceptions::PyValueError, prelude::*, types::PyDict, wrap_pyfunction};

use crate::{
    aggregate::TranslationEstimate,
    core::TranslationEstimator,
    error::AlignmentError,
    estimators::CliqueEstimator,
    settings::{CliqueSettings, ScoringType, StochasticSettings},
    types::DataMatrix,
};

fn to_py_err(err: AlignmentError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn points_from_python(obj: &Bound<'_, PyAny>) -> PyResult<DataMatrix> {
    let rows: Vec<(f64, f64)> = obj.extract()?;
    Ok(crate::types::points_from_xy(&rows))
}

fn estimate_to_python<'py>(
    py: Python<'py>,
    estimate: &TranslationEstimate,
) -> PyResult<Bound<'py, PyDict>> {
    let out = PyDict::new_bound(py);
    out.set_item("translation", (estimate.translation.x, estimate.translation.y))?;
    out.set_item("support", estimate.support)?;
    out.set_item("method", estimate.method.to_string())?;
    out.set_item("score", estimate.score)?;
    out.set_item("clique", estimate.clique.clone())?;
    out.set_item("graph_edges", estimate.graph_edges)?;
    out.set_item("graph_components", estimate.graph_components)?;
    out.set_item("exhaustive", estimate.exhaustive)?;
    Ok(out)
}

#[pyfunction(signature = (source, target, ratio=1.0, indices=None, seed=42, scoring="truncated_mean"))]
pub fn find_translation_stochastic_py(
    source: Bound<PyAny>,
    target: Bound<PyAny>,
    ratio: f64,
    indices: Option<Vec<usize>>,
    seed: u64,
    scoring: &str,
) -> PyResult<Py<PyDict>> {
    let py = source.py();
    let scoring = match scoring {
        "truncated_mean" => ScoringType::TruncatedMean,
        "sum_of_lengths" => ScoringType::SumOfLengths,
        other => {
            return Err(PyValueError::new_err(format!("unknown scoring: {other}")));
        }
    };
    let settings = StochasticSettings::default()
        .with_seed(seed)
        .with_scoring(scoring);
    let settings = match indices {
        Some(indices) => settings.with_indices(indices),
        None => settings.with_ratio(ratio),
    };

    let source = points_from_python(&source)?;
    let target = points_from_python(&target)?;
    let estimate =
        crate::find_translation_stochastic(&source, &target, Some(settings)).map_err(to_py_err)?;
    Ok(estimate_to_python(py, &estimate)?.unbind())
}

#[pyfunction(signature = (source, target, epsilon=1.0, max_branches=None))]
pub fn find_translation_clique_py(
    source: Bound<PyAny>,
    target: Bound<PyAny>,
    epsilon: f64,
    max_branches: Option<usize>,
) -> PyResult<Py<PyDict>> {
    let py = source.py();
    let settings = CliqueSettings {
        max_branches,
        ..CliqueSettings::default().with_epsilon(epsilon)
    };

    let source = points_from_python(&source)?;
    let target = points_from_python(&target)?;
    let estimate = CliqueEstimator::new(settings)
        .estimate(&source, &target)
        .map_err(to_py_err)?;
    Ok(estimate_to_python(py, &estimate)?.unbind())
}

#[pyfunction]
pub fn centroids_from_labels_py(mask: Vec<Vec<u32>>) -> PyResult<Vec<(f64, f64)>> {
    let height = mask.len();
    let width = mask.first().map_or(0, Vec::len);
    if mask.iter().any(|row| row.len() != width) {
        return Err(PyValueError::new_err("all mask rows must have the same length"));
    }
    let flat: Vec<u32> = mask.into_iter().flatten().collect();
    let mask = nalgebra::DMatrix::from_row_slice(height, width, &flat);

    let centroids = crate::centroids_from_labels(&mask).map_err(to_py_err)?;
    Ok(centroids
        .row_iter()
        .map(|row| (row[0], row[1]))
        .collect())
}

#[pymodule]
fn _cellalign_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(find_translation_stochastic_py, m)?)?;
    m.add_function(wrap_pyfunction!(find_translation_clique_py, m)?)?;
    m.add_function(wrap_pyfunction!(centroids_from_labels_py, m)?)?;
    Ok(())
}
