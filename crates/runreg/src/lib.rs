// =============================================================================
// runreg Python Bindings
// =============================================================================
//
// Exposes `runreg-core` to Python through PyO3. The Python class keeps the
// scikit-learn shape callers expect:
//
//     model = RunningLinearRegression().fit(x_train, y_train)
//     model.pushpop(x, y)
//     model.predict(x_test)
//
// All numerics live in `runreg-core`; this crate only converts arguments
// and maps errors onto Python exceptions.
//
// =============================================================================

use pyo3::prelude::*;

mod errors;
mod inference_py;
mod regression_py;

use inference_py::{pvalue_t_py, t_ppf_py};
use regression_py::PyRunningLinearRegression;

// =============================================================================
// Module Registration
// =============================================================================

/// runreg: sliding-window linear regression with a Rust backend
///
/// This is the internal Rust module. Users should import from the
/// Python package: `import runreg`
#[pymodule]
fn _runreg(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRunningLinearRegression>()?;

    m.add_function(wrap_pyfunction!(t_ppf_py, m)?)?;
    m.add_function(wrap_pyfunction!(pvalue_t_py, m)?)?;

    Ok(())
}
