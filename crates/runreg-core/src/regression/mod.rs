// =============================================================================
// Running Simple Linear Regression
// =============================================================================
//
// A least-squares line y = β₀ + β₁x over a sliding window of points, kept
// current in O(1) per update:
//
//     β₁ = Cov(x, y) / Var(x)
//     β₀ = ȳ − β₁·x̄
//
// After any push/pop/pushpop the coefficients equal what a fresh batch OLS
// fit of the current window would produce (up to rounding).
//
// LIFECYCLE
// ---------
//     new() ──fit()──▶ Fitted ──push/pop/pushpop──▶ Fitted
//
// Every method other than `fit` returns `NotFitted` before the first `fit`.
// While Fitted, the coefficients exist only when the window holds at least
// two points; an update that leaves fewer clears them and reports
// `TooFewPoints` (the window change itself is kept).
//
// Diagnostics (correlation, R², t-score, slope CI) are computed on demand
// from the current moments. They are undefined for degenerate windows
// (N ≤ 2, constant x or y, |r| = 1) and then come back as NaN or ±∞ rather
// than as errors.
//
// Concurrency: mutation takes `&mut self`, so the borrow checker already
// enforces one writer and no concurrent readers.
//
// =============================================================================

use ndarray::Array1;
use tracing::{debug, trace};

use crate::diagnostics::resid_response;
use crate::error::{Result, RunRegError};
use crate::inference::{pvalue_t, t_critical, NORMAL_APPROX_DF};
use crate::running::RunningSimpleStats;
use crate::solvers::fit_ols;

/// Minimum number of points for the line to be defined.
const MIN_POINTS: usize = 2;

// =============================================================================
// Configuration
// =============================================================================

/// Options for [`RunningLinearRegression`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionConfig {
    /// Degrees of freedom above which Student-t quantiles and p-values are
    /// replaced by the standard normal.
    /// Default: 1000
    pub normal_approx_df: f64,

    /// Log every coefficient update at debug level instead of trace.
    /// Default: false
    pub verbose: bool,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            normal_approx_df: NORMAL_APPROX_DF,
            verbose: false,
        }
    }
}

// =============================================================================
// Model State
// =============================================================================

/// Intercept and slope of the fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// β₀
    pub intercept: f64,
    /// β₁
    pub slope: f64,
}

impl Coefficients {
    #[inline]
    pub fn predict_one(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Window statistics plus the coefficients derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    stats: RunningSimpleStats,
    coefficients: Option<Coefficients>,
}

impl FittedModel {
    pub fn stats(&self) -> &RunningSimpleStats {
        &self.stats
    }

    /// `None` while the window holds fewer than two points.
    pub fn coefficients(&self) -> Option<Coefficients> {
        self.coefficients
    }

    /// Recompute β₀, β₁ from the current moments.
    fn update_betas(&mut self, verbose: bool) -> Result<()> {
        let n = self.stats.len();
        if n < MIN_POINTS {
            self.coefficients = None;
            debug!(n_obs = n, "window too small, coefficients cleared");
            return Err(RunRegError::TooFewPoints {
                required: MIN_POINTS,
                actual: n,
            });
        }

        let slope = self.stats.xy_cov() / self.stats.x_var();
        let intercept = self.stats.y_mean() - slope * self.stats.x_mean();
        self.coefficients = Some(Coefficients { intercept, slope });

        if verbose {
            debug!(n_obs = n, intercept, slope, "coefficients updated");
        } else {
            trace!(n_obs = n, intercept, slope, "coefficients updated");
        }
        Ok(())
    }
}

/// Whether `fit` has been called.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModelState {
    #[default]
    Unfitted,
    Fitted(FittedModel),
}

// =============================================================================
// The Model
// =============================================================================

/// Simple linear regression over a sliding window with O(1) updates.
///
/// # Example
/// ```
/// use runreg_core::RunningLinearRegression;
///
/// let mut model = RunningLinearRegression::new();
/// model.fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0])?;
///
/// // Slide the window forward by one point
/// let evicted = model.pushpop(5.0, 10.0)?;
/// assert_eq!(evicted, (1.0, 2.0));
///
/// let pred = model.predict(&[6.0])?;
/// assert!((pred[0] - 12.0).abs() < 1e-9);
/// # Ok::<(), runreg_core::RunRegError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningLinearRegression {
    config: RegressionConfig,
    state: ModelState,
}

impl RunningLinearRegression {
    /// Unfitted model with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unfitted model with a custom configuration.
    pub fn with_config(config: RegressionConfig) -> Self {
        Self {
            config,
            state: ModelState::Unfitted,
        }
    }

    pub fn config(&self) -> &RegressionConfig {
        &self.config
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    fn fitted(&self) -> Result<&FittedModel> {
        match &self.state {
            ModelState::Fitted(model) => Ok(model),
            ModelState::Unfitted => Err(RunRegError::NotFitted),
        }
    }

    fn fitted_mut(&mut self) -> Result<&mut FittedModel> {
        match &mut self.state {
            ModelState::Fitted(model) => Ok(model),
            ModelState::Unfitted => Err(RunRegError::NotFitted),
        }
    }

    // -------------------------------------------------------------------------
    // Fitting and updates
    // -------------------------------------------------------------------------

    /// Fit on an initial window, replacing any previous state.
    ///
    /// The coefficients come from the closed-form normal equations over the
    /// whole batch. Fewer than two points is allowed: the model becomes
    /// Fitted with undefined coefficients.
    ///
    /// # Errors
    /// - `LengthMismatch` if `x_train` and `y_train` differ in length
    /// - `SingularDesign` if x is constant across two or more points
    ///
    /// On error the previous state is left untouched.
    pub fn fit(&mut self, x_train: &[f64], y_train: &[f64]) -> Result<&mut Self> {
        let stats = RunningSimpleStats::from_slices(x_train, y_train)?;

        let coefficients = if stats.len() < MIN_POINTS {
            None
        } else {
            let ols = fit_ols(x_train, y_train)?;
            Some(Coefficients {
                intercept: ols.intercept,
                slope: ols.slope,
            })
        };

        match coefficients {
            Some(c) => debug!(
                n_obs = stats.len(),
                intercept = c.intercept,
                slope = c.slope,
                "fitted initial window"
            ),
            None => debug!(n_obs = stats.len(), "fitted initial window without coefficients"),
        }

        self.state = ModelState::Fitted(FittedModel { stats, coefficients });
        Ok(self)
    }

    /// Add the point `(x, y)` to the window.
    ///
    /// # Errors
    /// `NotFitted`; `TooFewPoints` if the window still holds fewer than two
    /// points afterwards.
    pub fn push(&mut self, x: f64, y: f64) -> Result<()> {
        let verbose = self.config.verbose;
        let model = self.fitted_mut()?;
        model.stats.push(x, y);
        model.update_betas(verbose)
    }

    /// Remove and return the oldest point.
    ///
    /// # Errors
    /// `NotFitted`; `EmptyQueue` on an empty window; `TooFewPoints` if fewer
    /// than two points remain (the point is still removed).
    pub fn pop(&mut self) -> Result<(f64, f64)> {
        let verbose = self.config.verbose;
        let model = self.fitted_mut()?;
        let evicted = model.stats.pop()?;
        model.update_betas(verbose)?;
        Ok(evicted)
    }

    /// Replace the oldest point with `(x, y)` and return the evicted point.
    ///
    /// # Errors
    /// `NotFitted`; `EmptyQueue` on an empty window; `TooFewPoints` for a
    /// one-point window (the replacement still happens).
    pub fn pushpop(&mut self, x: f64, y: f64) -> Result<(f64, f64)> {
        let verbose = self.config.verbose;
        let model = self.fitted_mut()?;
        let evicted = model.stats.pushpop(x, y)?;
        model.update_betas(verbose)?;
        Ok(evicted)
    }

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    /// Read-only view of the window statistics.
    pub fn stats(&self) -> Result<&RunningSimpleStats> {
        Ok(&self.fitted()?.stats)
    }

    /// Number of points in the window.
    pub fn n_obs(&self) -> Result<usize> {
        Ok(self.fitted()?.stats.len())
    }

    /// Current intercept and slope.
    ///
    /// # Errors
    /// `NotFitted`; `TooFewPoints` when the window holds fewer than two points.
    pub fn coefficients(&self) -> Result<Coefficients> {
        let model = self.fitted()?;
        model.coefficients.ok_or(RunRegError::TooFewPoints {
            required: MIN_POINTS,
            actual: model.stats.len(),
        })
    }

    /// β₀
    pub fn intercept(&self) -> Result<f64> {
        Ok(self.coefficients()?.intercept)
    }

    /// β₁
    pub fn slope(&self) -> Result<f64> {
        Ok(self.coefficients()?.slope)
    }

    /// β₁·x + β₀ for each test value.
    pub fn predict(&self, x_test: &[f64]) -> Result<Array1<f64>> {
        let coefficients = self.coefficients()?;
        Ok(x_test.iter().map(|&x| coefficients.predict_one(x)).collect())
    }

    /// Predictions for the x values currently in the window.
    pub fn fitted_values(&self) -> Result<Array1<f64>> {
        let coefficients = self.coefficients()?;
        let stats = self.stats()?;
        Ok(stats.iter().map(|(x, _)| coefficients.predict_one(x)).collect())
    }

    /// y − ŷ for the points currently in the window.
    pub fn residuals(&self) -> Result<Array1<f64>> {
        let fitted = self.fitted_values()?;
        let y: Array1<f64> = self.stats()?.iter().map(|(_, y)| y).collect();
        Ok(resid_response(&y, &fitted))
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Pearson correlation r = Cov(x, y) / √(Var(x)·Var(y)).
    pub fn correlation(&self) -> Result<f64> {
        let stats = self.stats()?;
        Ok(stats.xy_cov() / (stats.x_var() * stats.y_var()).sqrt())
    }

    /// Coefficient of determination r².
    pub fn r_squared(&self) -> Result<f64> {
        Ok(self.correlation()?.powi(2))
    }

    /// t-statistic of the slope: √(N − 2)·r / √(1 − r²).
    ///
    /// Only meaningful for N > 2 and |r| < 1; otherwise NaN or ±∞.
    pub fn t_score(&self) -> Result<f64> {
        let n = self.n_obs()? as f64;
        let r = self.correlation()?;
        Ok((n - 2.0).sqrt() * r / (1.0 - r * r).sqrt())
    }

    /// Standard error of the slope, β₁ / t.
    ///
    /// Evaluated as √(Var(y)/Var(x)) · √(1 − r²) / √(N − 2), which is the same
    /// quantity but stays finite when β₁ = 0 and is 0 for a perfect fit.
    ///
    /// # Errors
    /// `NotFitted`; `TooFewPoints` when N < 3.
    pub fn slope_std_error(&self) -> Result<f64> {
        let n = self.require_points(3)?;
        let stats = self.stats()?;
        let r2 = self.r_squared()?;
        let df = (n - 2) as f64;
        Ok((stats.y_var() / stats.x_var()).sqrt() * (1.0 - r2).max(0.0).sqrt() / df.sqrt())
    }

    /// Two-sided p-value for H₀: β₁ = 0, Student-t with N − 2 df.
    ///
    /// # Errors
    /// `NotFitted`; `TooFewPoints` when N < 3.
    pub fn slope_pvalue(&self) -> Result<f64> {
        let n = self.require_points(3)?;
        let t = self.t_score()?;
        Ok(pvalue_t(t, (n - 2) as f64, self.config.normal_approx_df))
    }

    /// Two-sided 100(1 − α)% confidence interval for the slope.
    ///
    /// radius = (β₁ / t) · t_{N−2, α/2}, returned as (β₁ − radius, β₁ + radius).
    ///
    /// # Errors
    /// - `NotFitted`
    /// - `InvalidValue` unless 0 < `alpha` < 1
    /// - `TooFewPoints` when N < 3 (no degrees of freedom left)
    pub fn slope_confidence_interval(&self, alpha: f64) -> Result<(f64, f64)> {
        self.fitted()?;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RunRegError::InvalidValue(format!(
                "alpha must be in (0, 1), got {}",
                alpha
            )));
        }
        let n = self.require_points(3)?;
        let slope = self.slope()?;

        let t_crit = t_critical((n - 2) as f64, alpha / 2.0, self.config.normal_approx_df);
        let radius = self.slope_std_error()? * t_crit;
        Ok((slope - radius, slope + radius))
    }

    fn require_points(&self, required: usize) -> Result<usize> {
        let n = self.n_obs()?;
        if n < required {
            return Err(RunRegError::TooFewPoints { required, actual: n });
        }
        Ok(n)
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(f64, f64),
        Pop,
        PushPop(f64, f64),
    }

    fn coord() -> impl Strategy<Value = f64> {
        -50.0..50.0_f64
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (coord(), coord()).prop_map(|(x, y)| Op::Push(x, y)),
            Just(Op::Pop),
            (coord(), coord()).prop_map(|(x, y)| Op::PushPop(x, y)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // --- β₁ = Cov/Var and β₀ = ȳ − β₁x̄ after every update ---
        #[test]
        fn betas_track_moments(
            initial in proptest::collection::vec((coord(), coord()), 3..20),
            ops in proptest::collection::vec(op(), 1..40),
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = initial.into_iter().unzip();
            let mut model = RunningLinearRegression::new();
            prop_assume!(model.fit(&xs, &ys).is_ok());

            for op in ops {
                let outcome = match op {
                    Op::Push(x, y) => model.push(x, y),
                    Op::Pop => model.pop().map(|_| ()),
                    Op::PushPop(x, y) => model.pushpop(x, y).map(|_| ()),
                };

                let stats = model.stats().unwrap();
                if stats.len() < 2 {
                    prop_assert!(outcome.is_err());
                    prop_assert!(model.coefficients().is_err());
                    continue;
                }
                prop_assert!(outcome.is_ok());

                let c = model.coefficients().unwrap();
                let slope = stats.xy_cov() / stats.x_var();
                let intercept = stats.y_mean() - slope * stats.x_mean();
                prop_assert_eq!(c.slope.to_bits(), slope.to_bits());
                prop_assert_eq!(c.intercept.to_bits(), intercept.to_bits());
            }
        }

        // --- Correlation stays in [-1, 1] for non-degenerate windows ---
        #[test]
        fn correlation_is_bounded(
            points in proptest::collection::vec((coord(), coord()), 3..40),
            incoming in proptest::collection::vec((coord(), coord()), 0..20),
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
            let mut model = RunningLinearRegression::new();
            prop_assume!(model.fit(&xs, &ys).is_ok());
            for (x, y) in incoming {
                model.pushpop(x, y).unwrap();
            }

            let stats = model.stats().unwrap();
            prop_assume!(stats.x_var() > 1.0 && stats.y_var() > 1.0);
            let r = model.correlation().unwrap();
            prop_assert!(r.abs() <= 1.0 + 1e-9, "correlation out of range: {}", r);
        }

        // --- Incremental coefficients match a batch refit of the window ---
        #[test]
        fn incremental_matches_batch_refit(
            points in proptest::collection::vec((coord(), coord()), 3..30),
            incoming in proptest::collection::vec((coord(), coord()), 1..30),
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
            let mut model = RunningLinearRegression::new();
            prop_assume!(model.fit(&xs, &ys).is_ok());
            for (x, y) in incoming {
                model.pushpop(x, y).unwrap();
            }

            let (wx, wy): (Vec<f64>, Vec<f64>) = model.stats().unwrap().iter().unzip();
            prop_assume!(model.stats().unwrap().x_var() > 1.0);
            let batch = fit_ols(&wx, &wy).unwrap();
            let c = model.coefficients().unwrap();
            prop_assert!((c.slope - batch.slope).abs() < 1e-6);
            prop_assert!((c.intercept - batch.intercept).abs() < 1e-5);
        }
    }
}
