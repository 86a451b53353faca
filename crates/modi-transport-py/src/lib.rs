#![allow(clippy::useless_conversion)]

use modi_transport_core::{
    solve as solve_problem, InitialMethod, SolveStatus, TransportError, TransportOptions,
    TransportProblem, TransportSolution,
};
use num_traits::ToPrimitive;
use numpy::{Element, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn array_rows<T: Element + Copy>(array: &PyReadonlyArray2<'_, T>) -> Vec<Vec<T>> {
    array
        .as_array()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect()
}

fn problem_from_rows<C: ToPrimitive + Copy>(
    supply: Vec<i64>,
    demand: Vec<i64>,
    cost: Vec<Vec<C>>,
) -> PyResult<TransportProblem> {
    TransportProblem::new(supply, demand, cost).map_err(to_py_err)
}

/// Costs may arrive as float64 or int64 arrays.
fn build_problem(
    supply: PyReadonlyArray1<'_, i64>,
    demand: PyReadonlyArray1<'_, i64>,
    cost: &Bound<'_, PyAny>,
) -> PyResult<TransportProblem> {
    let supply_vec = supply.as_slice()?.to_vec();
    let demand_vec = demand.as_slice()?.to_vec();
    if let Ok(real) = cost.extract::<PyReadonlyArray2<'_, f64>>() {
        return problem_from_rows(supply_vec, demand_vec, array_rows(&real));
    }
    if let Ok(integer) = cost.extract::<PyReadonlyArray2<'_, i64>>() {
        return problem_from_rows(supply_vec, demand_vec, array_rows(&integer));
    }
    Err(pyo3::exceptions::PyTypeError::new_err(
        "cost must be a 2-D float64 or int64 array",
    ))
}

fn build_options(
    max_iters: Option<usize>,
    tolerance: Option<f64>,
    initial: Option<String>,
    check_invariants: Option<bool>,
) -> PyResult<TransportOptions> {
    let mut opts = TransportOptions::default();
    if let Some(value) = max_iters {
        opts.max_iters = value;
    }
    if let Some(value) = tolerance {
        if !value.is_finite() || value < 0.0 {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "tolerance must be finite and non-negative",
            ));
        }
        opts.tolerance = value;
    }
    if let Some(value) = check_invariants {
        opts.check_invariants = value;
    }
    if let Some(method) = initial {
        let normalized = method.to_ascii_lowercase();
        opts.initial = match normalized.as_str() {
            "matrix_minimum" | "matrix-minimum" | "minimum" | "least_cost" => {
                InitialMethod::MatrixMinimum
            }
            "northwest_corner" | "northwest-corner" | "northwest" | "nwc" => {
                InitialMethod::NorthwestCorner
            }
            "vogel" | "vam" => InitialMethod::Vogel,
            _ => {
                return Err(pyo3::exceptions::PyValueError::new_err(
                    "initial must be 'matrix_minimum', 'northwest_corner', or 'vogel'",
                ))
            }
        };
    }
    Ok(opts)
}

fn to_py_err(err: TransportError) -> PyErr {
    match err {
        TransportError::InvalidInput(_) | TransportError::Unbalanced { .. } => {
            pyo3::exceptions::PyValueError::new_err(err.to_string())
        }
        _ => pyo3::exceptions::PyRuntimeError::new_err(err.to_string()),
    }
}

fn status_label(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Optimal => "optimal",
        SolveStatus::IterationLimit => "iteration_limit",
    }
}

fn stats_to_dict(py: Python<'_>, solution: &TransportSolution) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    dict.set_item("status", status_label(solution.status))?;
    dict.set_item("iterations", solution.stats.iterations)?;
    dict.set_item("pivots", solution.stats.pivots)?;
    dict.set_item("degenerate_pivots", solution.stats.degenerate_pivots)?;
    dict.set_item("initial_cost", solution.stats.initial_cost)?;
    dict.set_item("cost_history", solution.stats.cost_history.clone())?;
    if let Some(potentials) = solution.potentials.as_ref() {
        dict.set_item("u", potentials.u.clone())?;
        dict.set_item("v", potentials.v.clone())?;
    }
    Ok(dict.to_object(py))
}

#[allow(clippy::too_many_arguments, clippy::type_complexity)]
#[pyfunction]
#[pyo3(signature = (
    supply,
    demand,
    cost,
    *,
    max_iters = None,
    tolerance = None,
    initial = None,
    check_invariants = None
))]
fn solve(
    py: Python<'_>,
    supply: PyReadonlyArray1<'_, i64>,
    demand: PyReadonlyArray1<'_, i64>,
    cost: &Bound<'_, PyAny>,
    max_iters: Option<usize>,
    tolerance: Option<f64>,
    initial: Option<String>,
    check_invariants: Option<bool>,
) -> PyResult<(Py<PyArray2<i64>>, f64, PyObject)> {
    let problem = build_problem(supply, demand, cost)?;
    let opts = build_options(max_iters, tolerance, initial, check_invariants)?;
    let solution = solve_problem(&problem, &opts).map_err(to_py_err)?;

    let stats = stats_to_dict(py, &solution)?;
    let allocation = PyArray2::from_vec2_bound(py, &solution.allocation.to_rows())?;
    Ok((allocation.unbind(), solution.total_cost, stats))
}

#[pyfunction]
fn format_solution(
    supply: PyReadonlyArray1<'_, i64>,
    demand: PyReadonlyArray1<'_, i64>,
    cost: &Bound<'_, PyAny>,
) -> PyResult<String> {
    let problem = build_problem(supply, demand, cost)?;
    let solution = solve_problem(&problem, &TransportOptions::default()).map_err(to_py_err)?;
    Ok(solution.to_string())
}

#[pymodule]
fn _core(_py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add("__version__", env!("CARGO_PKG_VERSION"))?;
    module.add_function(wrap_pyfunction!(solve, module)?)?;
    module.add_function(wrap_pyfunction!(format_solution, module)?)?;
    module.add(
        "__doc__",
        "Rust core bindings for the MODI transportation solver (costs: float64 or int64)",
    )?;
    module.add("__all__", vec!["solve", "format_solution", "__version__"])?;
    Ok(())
}

