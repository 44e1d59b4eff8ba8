// =============================================================================
// runreg-core
// =============================================================================
//
// Simple (one predictor) least-squares regression over a sliding window,
// updated in O(1) per added or evicted point instead of refitting.
//
// STRUCTURE:
// ----------
//   - running:     RunningMean and RunningSimpleStats (incremental moments)
//   - regression:  RunningLinearRegression, built on RunningSimpleStats
//   - solvers:     closed-form batch OLS, used for the initial fit
//   - inference:   Student-t / normal quantiles and p-values
//   - diagnostics: residual-based goodness of fit
//   - error:       error type shared by every module
//
// Data flows one way: RunningMean → RunningSimpleStats →
// RunningLinearRegression. Each layer only talks to the one directly below.
//
// =============================================================================

pub mod diagnostics;
pub mod error;
pub mod inference;
pub mod regression;
pub mod running;
pub mod solvers;

pub use error::{Result, RunRegError};
pub use inference::{pvalue_t, pvalue_z, t_critical, t_ppf, z_ppf};
pub use regression::{
    Coefficients, FittedModel, ModelState, RegressionConfig, RunningLinearRegression,
};
pub use running::{RunningMean, RunningSimpleStats};
pub use solvers::{fit_ols, OlsFit};
