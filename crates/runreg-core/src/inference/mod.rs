// =============================================================================
// Statistical Inference
// =============================================================================
//
// Quantiles and p-values for testing the regression slope:
//   - t_ppf / z_ppf:  inverse CDFs (Student's t and standard normal)
//   - t_critical:     upper-tail critical value for a confidence interval
//   - pvalue_t/z:     two-tailed p-values for a test statistic
//
// Distributions come from `statrs`. For large degrees of freedom the t
// distribution is indistinguishable from the normal, so callers pass a cutoff
// above which the normal is used instead.
//
// =============================================================================

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Degrees of freedom above which the normal approximation is used.
pub const NORMAL_APPROX_DF: f64 = 1000.0;

// =============================================================================
// Quantiles
// =============================================================================

/// Inverse CDF of the standard normal.
///
/// Returns NaN for `p` outside [0, 1].
pub fn z_ppf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Inverse CDF of Student's t with `df` degrees of freedom.
///
/// # Arguments
/// * `p`  - Probability in [0, 1]
/// * `df` - Degrees of freedom (must be > 0)
///
/// # Returns
/// The value t such that P(T <= t) = p, or NaN for invalid arguments.
pub fn t_ppf(p: f64, df: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) || !(df > 0.0) {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => t_dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Upper-tail critical value: the t such that P(T > t) = `tail_prob`.
///
/// For a two-sided 100(1 − α)% interval pass `tail_prob = α / 2`.
/// Above `normal_approx_df` degrees of freedom the normal quantile is used.
pub fn t_critical(df: f64, tail_prob: f64, normal_approx_df: f64) -> f64 {
    if df > normal_approx_df {
        return z_ppf(1.0 - tail_prob);
    }
    t_ppf(1.0 - tail_prob, df)
}

// =============================================================================
// P-Values
// =============================================================================

/// Two-tailed p-value of a z-statistic.
pub fn pvalue_z(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z.is_infinite() {
        return 0.0;
    }
    match Normal::new(0.0, 1.0) {
        // P(|Z| > |z|) = 2 * (1 - Φ(|z|))
        Ok(normal) => 2.0 * (1.0 - normal.cdf(z.abs())),
        Err(_) => f64::NAN,
    }
}

/// Two-tailed p-value of a t-statistic with `df` degrees of freedom.
///
/// An infinite statistic (a perfect linear fit) gives 0.
pub fn pvalue_t(t: f64, df: f64, normal_approx_df: f64) -> f64 {
    if t.is_nan() || !(df > 0.0) {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    if df > normal_approx_df {
        return pvalue_z(t);
    }

    let t_dist = match StudentsT::new(0.0, 1.0, df) {
        Ok(d) => d,
        Err(_) => return f64::NAN,
    };
    2.0 * (1.0 - t_dist.cdf(t.abs()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_z_ppf_known_values() {
        assert_abs_diff_eq!(z_ppf(0.5), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(z_ppf(0.975), 1.959964, epsilon = 1e-5);
    }

    #[test]
    fn test_t_ppf_known_values() {
        // Standard t-table entries
        assert_abs_diff_eq!(t_ppf(0.975, 2.0), 4.302653, epsilon = 1e-4);
        assert_abs_diff_eq!(t_ppf(0.975, 10.0), 2.228139, epsilon = 1e-4);
        assert_abs_diff_eq!(t_ppf(0.95, 5.0), 2.015048, epsilon = 1e-4);
    }

    #[test]
    fn test_t_ppf_symmetric() {
        let upper = t_ppf(0.9, 7.0);
        let lower = t_ppf(0.1, 7.0);
        assert_abs_diff_eq!(upper, -lower, epsilon = 1e-6);
    }

    #[test]
    fn test_t_ppf_invalid_arguments() {
        assert!(t_ppf(1.5, 3.0).is_nan());
        assert!(t_ppf(-0.1, 3.0).is_nan());
        assert!(t_ppf(0.5, 0.0).is_nan());
        assert!(t_ppf(0.5, f64::NAN).is_nan());
    }

    #[test]
    fn test_t_critical_switches_to_normal() {
        let t = t_critical(5000.0, 0.025, NORMAL_APPROX_DF);
        assert_abs_diff_eq!(t, z_ppf(0.975), epsilon = 1e-12);

        let t = t_critical(10.0, 0.025, NORMAL_APPROX_DF);
        assert_abs_diff_eq!(t, 2.228139, epsilon = 1e-4);
    }

    #[test]
    fn test_pvalue_z_known_value() {
        assert_abs_diff_eq!(pvalue_z(0.0), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(pvalue_z(1.96), 0.05, epsilon = 0.001);
        assert_abs_diff_eq!(pvalue_z(2.0), pvalue_z(-2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_pvalue_t_inverts_quantile() {
        // Two-tailed p at the 97.5% quantile is 5%
        let t = t_ppf(0.975, 8.0);
        assert_abs_diff_eq!(pvalue_t(t, 8.0, NORMAL_APPROX_DF), 0.05, epsilon = 1e-5);
    }

    #[test]
    fn test_pvalue_t_edge_cases() {
        assert_eq!(pvalue_t(f64::INFINITY, 4.0, NORMAL_APPROX_DF), 0.0);
        assert!(pvalue_t(f64::NAN, 4.0, NORMAL_APPROX_DF).is_nan());
        assert!(pvalue_t(1.0, 0.0, NORMAL_APPROX_DF).is_nan());
    }

    #[test]
    fn test_pvalue_t_large_df_matches_z() {
        let p_t = pvalue_t(2.0, 2000.0, NORMAL_APPROX_DF);
        assert_abs_diff_eq!(p_t, pvalue_z(2.0), epsilon = 1e-12);
    }
}
