// =============================================================================
// Running Bivariate Moments
// =============================================================================
//
// Tracks Var(x), Var(y) and Cov(x, y) over a window of (x, y) pairs using five
// running means, one each for x, y, x², y² and x·y:
//
//     Var(x)    = E[x²] − E[x]²
//     Var(y)    = E[y²] − E[y]²
//     Cov(x, y) = E[xy] − E[x]·E[y]
//
// Every tracker holds its own copy of the window (transformed). That is five
// queues for one logical window; it is what keeps each update O(1).
//
// All statistics are population moments (divide by N). The raw-moment
// formula can lose precision when |x| is large relative to its spread.
// The initial batch is centered before squaring; later updates are not.
//
// =============================================================================

use crate::error::{Result, RunRegError};
use crate::running::RunningMean;

/// Population variances and covariance of a sliding window of (x, y) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningSimpleStats {
    xs: RunningMean,
    ys: RunningMean,
    x2s: RunningMean,
    y2s: RunningMean,
    xys: RunningMean,
    x_var: f64,
    y_var: f64,
    xy_cov: f64,
}

impl RunningSimpleStats {
    /// Empty window; all statistics are 0.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from paired initial batches.
    ///
    /// # Errors
    /// `LengthMismatch` if `xs` and `ys` differ in length.
    pub fn from_slices(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(RunRegError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }

        let x_rm = RunningMean::from_values(xs);
        let y_rm = RunningMean::from_values(ys);
        let (x_var, y_var, xy_cov) = centered_moments(xs, ys, x_rm.mean(), y_rm.mean());

        Ok(Self {
            x2s: xs.iter().map(|x| x * x).collect(),
            y2s: ys.iter().map(|y| y * y).collect(),
            xys: xs.iter().zip(ys).map(|(x, y)| x * y).collect(),
            xs: x_rm,
            ys: y_rm,
            x_var,
            y_var,
            xy_cov,
        })
    }

    /// Number of pairs in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn x_mean(&self) -> f64 {
        self.xs.mean()
    }

    #[inline]
    pub fn y_mean(&self) -> f64 {
        self.ys.mean()
    }

    /// Population variance of x.
    #[inline]
    pub fn x_var(&self) -> f64 {
        self.x_var
    }

    /// Population variance of y.
    #[inline]
    pub fn y_var(&self) -> f64 {
        self.y_var
    }

    /// Population covariance of x and y.
    #[inline]
    pub fn xy_cov(&self) -> f64 {
        self.xy_cov
    }

    /// Pairs in the window, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.xs.iter().zip(self.ys.iter())
    }

    /// Append the pair `(x, y)`.
    pub fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
        self.x2s.push(x * x);
        self.y2s.push(y * y);
        self.xys.push(x * y);
        self.update_var_cov();
    }

    /// Remove and return the oldest pair.
    ///
    /// # Errors
    /// `EmptyQueue` when the window is empty.
    pub fn pop(&mut self) -> Result<(f64, f64)> {
        if self.is_empty() {
            return Err(RunRegError::EmptyQueue { operation: "pop" });
        }
        let x = self.xs.pop()?;
        let y = self.ys.pop()?;
        self.x2s.pop()?;
        self.y2s.pop()?;
        self.xys.pop()?;
        self.update_var_cov();
        Ok((x, y))
    }

    /// Evict the oldest pair and append `(x, y)`; the window length is unchanged.
    ///
    /// # Errors
    /// `EmptyQueue` when the window is empty.
    pub fn pushpop(&mut self, x: f64, y: f64) -> Result<(f64, f64)> {
        if self.is_empty() {
            return Err(RunRegError::EmptyQueue { operation: "pushpop" });
        }
        let x_old = self.xs.pushpop(x)?;
        let y_old = self.ys.pushpop(y)?;
        self.x2s.pushpop(x * x)?;
        self.y2s.pushpop(y * y)?;
        self.xys.pushpop(x * y)?;
        self.update_var_cov();
        Ok((x_old, y_old))
    }

    /// Re-derive the second moments. All five means must already be current.
    fn update_var_cov(&mut self) {
        let (mx, my) = (self.xs.mean(), self.ys.mean());
        self.x_var = self.x2s.mean() - mx * mx;
        self.y_var = self.y2s.mean() - my * my;
        self.xy_cov = self.xys.mean() - mx * my;
    }
}

/// Two-pass population moments for the initial batch. Zeros when empty.
fn centered_moments(xs: &[f64], ys: &[f64], x_mean: f64, y_mean: f64) -> (f64, f64, f64) {
    if xs.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let n = xs.len() as f64;
    let (sxx, syy, sxy) = xs.iter().zip(ys).fold((0.0, 0.0, 0.0), |(sxx, syy, sxy), (&x, &y)| {
        let dx = x - x_mean;
        let dy = y - y_mean;
        (sxx + dx * dx, syy + dy * dy, sxy + dx * dy)
    });
    (sxx / n, syy / n, sxy / n)
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
        proptest::collection::vec((-100.0..100.0_f64, -100.0..100.0_f64), min_len..=max_len)
    }

    fn unzip(pairs: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
        pairs.iter().copied().unzip()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // --- pushpop is pop followed by push ---
        #[test]
        fn pushpop_equals_pop_then_push(
            window in pairs(1, 40),
            x in -100.0..100.0_f64,
            y in -100.0..100.0_f64,
        ) {
            let (xs, ys) = unzip(&window);
            let mut a = RunningSimpleStats::from_slices(&xs, &ys).unwrap();
            let mut b = a.clone();

            let evicted_a = a.pushpop(x, y).unwrap();
            let evicted_b = b.pop().unwrap();
            b.push(x, y);

            prop_assert_eq!(evicted_a, evicted_b);
            prop_assert_eq!(a.len(), b.len());
            prop_assert!((a.x_var() - b.x_var()).abs() < 1e-7);
            prop_assert!((a.y_var() - b.y_var()).abs() < 1e-7);
            prop_assert!((a.xy_cov() - b.xy_cov()).abs() < 1e-7);
        }

        // --- Sliding the whole window matches a fresh batch ---
        #[test]
        fn slide_matches_fresh_batch(initial in pairs(1, 30), incoming in pairs(1, 30)) {
            let (xs, ys) = unzip(&initial);
            let mut rss = RunningSimpleStats::from_slices(&xs, &ys).unwrap();
            for &(x, y) in &incoming {
                rss.pushpop(x, y).unwrap();
            }

            let window: Vec<(f64, f64)> = rss.iter().collect();
            let (wx, wy) = unzip(&window);
            let fresh = RunningSimpleStats::from_slices(&wx, &wy).unwrap();

            prop_assert!((rss.x_var() - fresh.x_var()).abs() < 1e-6);
            prop_assert!((rss.y_var() - fresh.y_var()).abs() < 1e-6);
            prop_assert!((rss.xy_cov() - fresh.xy_cov()).abs() < 1e-6);
        }
    }
}
