// =============================================================================
// RunningLinearRegression Python Class
// =============================================================================

use ndarray::{Array1, ArrayView1};
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use runreg_core::{RegressionConfig, RunRegError, RunningLinearRegression};

use crate::errors::to_py_err;

/// Copy a numpy view into a contiguous buffer; handles strided input.
fn to_vec(view: ArrayView1<'_, f64>) -> Vec<f64> {
    view.iter().copied().collect()
}

/// Simple linear regression over a sliding window.
///
/// `push` adds a point, `pop` drops the oldest, `pushpop` does both. Each
/// update is O(1) and leaves the coefficients equal to a refit of the
/// current window.
#[pyclass(name = "RunningLinearRegression")]
#[derive(Clone)]
pub struct PyRunningLinearRegression {
    inner: RunningLinearRegression,
}

impl PyRunningLinearRegression {
    /// Coefficient getter that maps "not fitted" and "too few points" to None.
    fn coefficient(&self, pick: fn(&runreg_core::Coefficients) -> f64) -> PyResult<Option<f64>> {
        match self.inner.coefficients() {
            Ok(c) => Ok(Some(pick(&c))),
            Err(RunRegError::NotFitted) | Err(RunRegError::TooFewPoints { .. }) => Ok(None),
            Err(e) => Err(to_py_err(e)),
        }
    }
}

#[pymethods]
impl PyRunningLinearRegression {
    #[new]
    #[pyo3(signature = (normal_approx_df=1000.0, verbose=false))]
    fn new(normal_approx_df: f64, verbose: bool) -> Self {
        Self {
            inner: RunningLinearRegression::with_config(RegressionConfig {
                normal_approx_df,
                verbose,
            }),
        }
    }

    /// Fit on an initial window. Returns the model so calls can be chained.
    fn fit<'py>(
        mut slf: PyRefMut<'py, Self>,
        x_train: PyReadonlyArray1<'py, f64>,
        y_train: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<PyRefMut<'py, Self>> {
        let x = to_vec(x_train.as_array());
        let y = to_vec(y_train.as_array());
        slf.inner.fit(&x, &y).map_err(to_py_err)?;
        Ok(slf)
    }

    /// Add the point (x, y) to the window.
    fn push(&mut self, x: f64, y: f64) -> PyResult<()> {
        self.inner.push(x, y).map_err(to_py_err)
    }

    /// Remove the oldest point and return it as (x, y).
    fn pop(&mut self) -> PyResult<(f64, f64)> {
        self.inner.pop().map_err(to_py_err)
    }

    /// Replace the oldest point with (x, y); returns the evicted point.
    fn pushpop(&mut self, x: f64, y: f64) -> PyResult<(f64, f64)> {
        self.inner.pushpop(x, y).map_err(to_py_err)
    }

    /// Predictions β₁·x + β₀ for an array of test values.
    fn predict<'py>(
        &self,
        py: Python<'py>,
        x_test: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let x = to_vec(x_test.as_array());
        let pred: Array1<f64> = self.inner.predict(&x).map_err(to_py_err)?;
        Ok(pred.into_pyarray_bound(py))
    }

    /// Intercept, or None before fit / with fewer than two points.
    #[getter]
    fn beta0_hat(&self) -> PyResult<Option<f64>> {
        self.coefficient(|c| c.intercept)
    }

    /// Slope, or None before fit / with fewer than two points.
    #[getter]
    fn beta1_hat(&self) -> PyResult<Option<f64>> {
        self.coefficient(|c| c.slope)
    }

    /// Number of points in the window.
    #[getter(N)]
    fn n_obs(&self) -> PyResult<usize> {
        self.inner.n_obs().map_err(to_py_err)
    }

    fn is_fitted(&self) -> bool {
        self.inner.is_fitted()
    }

    /// Sample correlation between x and y.
    fn r(&self) -> PyResult<f64> {
        self.inner.correlation().map_err(to_py_err)
    }

    /// Coefficient of determination.
    fn r2(&self) -> PyResult<f64> {
        self.inner.r_squared().map_err(to_py_err)
    }

    /// t-statistic of the slope.
    fn t_score(&self) -> PyResult<f64> {
        self.inner.t_score().map_err(to_py_err)
    }

    /// Standard error of the slope.
    fn bse(&self) -> PyResult<f64> {
        self.inner.slope_std_error().map_err(to_py_err)
    }

    /// Two-sided p-value for a zero slope.
    fn pvalue(&self) -> PyResult<f64> {
        self.inner.slope_pvalue().map_err(to_py_err)
    }

    /// 100(1 − alpha)% confidence interval for the slope as (lower, upper).
    #[pyo3(signature = (alpha=0.05))]
    fn conf_int(&self, alpha: f64) -> PyResult<(f64, f64)> {
        self.inner.slope_confidence_interval(alpha).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        match (self.inner.n_obs(), self.inner.coefficients()) {
            (Ok(n), Ok(c)) => format!(
                "RunningLinearRegression(N={}, beta0_hat={:.6}, beta1_hat={:.6})",
                n, c.intercept, c.slope
            ),
            (Ok(n), Err(_)) => format!("RunningLinearRegression(N={}, unfit line)", n),
            (Err(_), _) => "RunningLinearRegression(not fitted)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    #[test]
    fn test_to_vec_strided_view() {
        let a = array![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(to_vec(a.slice(s![..;2])), vec![1.0, 3.0, 5.0]);
        assert_eq!(to_vec(a.slice(s![..;-1])), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    }
}
