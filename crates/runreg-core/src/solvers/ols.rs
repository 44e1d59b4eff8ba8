// =============================================================================
// Closed-Form Ordinary Least Squares
// =============================================================================
//
// Solves the normal equations for a single predictor with an intercept:
//
//     X = [1  x]        (n × 2 design matrix)
//     β = (XᵀX)⁻¹ Xᵀy   β = [intercept, slope]
//
// This is the batch fit. `RunningLinearRegression::fit` uses it for the
// initial window; afterwards coefficients come from the running moments.
//
// XᵀX is symmetric positive definite whenever x is not constant, so Cholesky
// is tried first with LU as the fallback.
//
// =============================================================================

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::diagnostics::residual_sum_of_squares;
use crate::error::{Result, RunRegError};

/// Result of a batch least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// β₀
    pub intercept: f64,
    /// β₁
    pub slope: f64,
    /// (XᵀX)⁻¹, ordered [intercept, slope].
    pub covariance_unscaled: Array2<f64>,
    /// Residual variance SSE / (n − 2); NaN with exactly two observations.
    pub scale: f64,
    /// Number of observations used.
    pub n_obs: usize,
}

impl OlsFit {
    /// β₁·x + β₀ for each element.
    pub fn predict(&self, x: &[f64]) -> Array1<f64> {
        x.iter().map(|&xi| self.slope * xi + self.intercept).collect()
    }

    /// Standard errors of [intercept, slope]: sqrt(scale · diag((XᵀX)⁻¹)).
    pub fn std_errors(&self) -> Array1<f64> {
        self.covariance_unscaled
            .diag()
            .mapv(|v| (self.scale * v).sqrt())
    }
}

/// Build the n × 2 design matrix [1, x].
fn design_matrix(x: &[f64]) -> Array2<f64> {
    let mut design = Array2::ones((x.len(), 2));
    design.column_mut(1).assign(&Array1::from(x.to_vec()));
    design
}

/// Fit y = β₀ + β₁x by solving the normal equations.
///
/// # Errors
/// - `LengthMismatch` if `x` and `y` differ in length
/// - `TooFewPoints` with fewer than two observations
/// - `SingularDesign` if x is constant (XᵀX not invertible)
pub fn fit_ols(x: &[f64], y: &[f64]) -> Result<OlsFit> {
    if x.len() != y.len() {
        return Err(RunRegError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(RunRegError::TooFewPoints { required: 2, actual: n });
    }
    if x.iter().all(|&xi| xi == x[0]) {
        return Err(RunRegError::SingularDesign(format!(
            "x is constant ({}) across all {} observations",
            x[0], n
        )));
    }

    let design = to_dmatrix(&design_matrix(x));
    let response = DVector::from_column_slice(y);

    let xtx = design.transpose() * &design;
    let xty = design.transpose() * response;

    let (beta, inverse) = solve_and_invert(&xtx, &xty).ok_or_else(|| {
        RunRegError::SingularDesign("XᵀX could not be inverted".to_string())
    })?;

    let y_arr = Array1::from(y.to_vec());
    let fitted = Array1::from_shape_fn(n, |i| beta[1] * x[i] + beta[0]);
    let scale = if n > 2 {
        residual_sum_of_squares(&y_arr, &fitted) / (n - 2) as f64
    } else {
        f64::NAN
    };

    Ok(OlsFit {
        intercept: beta[0],
        slope: beta[1],
        covariance_unscaled: to_array2(&inverse),
        scale,
        n_obs: n,
    })
}

// -----------------------------------------------------------------------------
// ndarray ↔ nalgebra
// -----------------------------------------------------------------------------

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (nrows, ncols) = a.dim();
    DMatrix::from_fn(nrows, ncols, |i, j| a[[i, j]])
}

fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn(m.shape(), |(i, j)| m[(i, j)])
}

/// Solve Ax = b and return A⁻¹ alongside, Cholesky first then LU.
fn solve_and_invert(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<(DVector<f64>, DMatrix<f64>)> {
    let p = a.nrows();
    if let Some(chol) = a.clone().cholesky() {
        let solution = chol.solve(b);
        let inverse = chol.solve(&DMatrix::identity(p, p));
        return Some((solution, inverse));
    }

    let lu = a.clone().lu();
    let solution = lu.solve(b)?;
    let inverse = lu.try_inverse()?;
    Some((solution, inverse))
}

// =============================================================================
// Tests
// =============================================================================
