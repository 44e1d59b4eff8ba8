// =============================================================================
// Distribution Helpers
// =============================================================================

use pyo3::prelude::*;

use runreg_core::inference::{pvalue_t, t_ppf, NORMAL_APPROX_DF};

/// Student's t inverse CDF: the t such that P(T <= t) = p, T ~ t(df)
#[pyfunction]
#[pyo3(name = "t_ppf")]
pub fn t_ppf_py(p: f64, df: f64) -> f64 {
    t_ppf(p, df)
}

/// Two-tailed p-value of a t-statistic with `df` degrees of freedom
#[pyfunction]
#[pyo3(name = "pvalue_t", signature = (t, df, normal_approx_df=NORMAL_APPROX_DF))]
pub fn pvalue_t_py(t: f64, df: f64, normal_approx_df: f64) -> f64 {
    pvalue_t(t, df, normal_approx_df)
}
