// =============================================================================
// Residual Diagnostics
// =============================================================================
//
// Batch goodness-of-fit measures computed from observed and fitted values.
// The running model's own `r_squared` comes from the moments; these helpers
// recompute it from residuals, which is how the batch fit reports it.
//
//   resid_response:            y − ŷ
//   residual_sum_of_squares:   Σ(y − ŷ)²
//   r_squared_from_residuals:  1 − SS_res / SS_tot
//
// =============================================================================

use ndarray::Array1;

/// Response residuals y − ŷ.
///
/// Panics if the lengths differ.
pub fn resid_response(y: &Array1<f64>, fitted: &Array1<f64>) -> Array1<f64> {
    assert_eq!(y.len(), fitted.len(), "y and fitted must have the same length");
    y - fitted
}

/// Σ(y − ŷ)²
pub fn residual_sum_of_squares(y: &Array1<f64>, fitted: &Array1<f64>) -> f64 {
    resid_response(y, fitted).mapv(|r| r * r).sum()
}

/// Coefficient of determination 1 − SS_res / SS_tot.
///
/// NaN for empty input or when y is constant (SS_tot = 0).
pub fn r_squared_from_residuals(y: &Array1<f64>, fitted: &Array1<f64>) -> f64 {
    let y_bar = match y.mean() {
        Some(m) => m,
        None => return f64::NAN,
    };
    let ss_res = residual_sum_of_squares(y, fitted);
    let ss_tot = y.mapv(|yi| (yi - y_bar).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}
