// =============================================================================
// Running Mean over a FIFO Window
// =============================================================================
//
// Keeps the arithmetic mean of a queue of numbers while values are appended
// at the tail (`push`), evicted from the head (`pop`), or both at once
// (`pushpop`). Each update is O(1):
//
//     push:     m' = (N·m + x) / (N + 1)
//     pop:      m' = N/(N − 1) · (m − x_head/N)
//     pushpop:  m' = m + (x − x_head) / N
//
// The queue itself is kept so that `pop` knows which value leaves. The mean
// of an empty queue is 0.0.
//
// =============================================================================

use std::collections::VecDeque;

use crate::error::{Result, RunRegError};

/// Arithmetic mean of a FIFO queue, maintained in O(1) per update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningMean {
    queue: VecDeque<f64>,
    mean: f64,
}

impl RunningMean {
    /// Empty queue with mean 0.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an initial batch. The mean is computed by summation.
    pub fn from_values(values: &[f64]) -> Self {
        values.iter().copied().collect()
    }

    /// Number of values in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Current mean, or 0.0 for an empty window.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Values in the window, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.queue.iter().copied()
    }

    /// Append `x` at the tail.
    pub fn push(&mut self, x: f64) {
        let n = self.queue.len() as f64;
        self.queue.push_back(x);
        self.mean = (n * self.mean + x) / (n + 1.0);
    }

    /// Remove and return the head of the queue.
    ///
    /// Popping the last value resets the mean to 0.0.
    pub fn pop(&mut self) -> Result<f64> {
        let n = self.queue.len();
        let head = self
            .queue
            .pop_front()
            .ok_or(RunRegError::EmptyQueue { operation: "pop" })?;

        self.mean = if n == 1 {
            0.0
        } else {
            let n = n as f64;
            n / (n - 1.0) * (self.mean - head / n)
        };
        Ok(head)
    }

    /// Evict the head and append `x`, keeping the window length fixed.
    ///
    /// Cheaper than `pop` followed by `push`. Returns the evicted value.
    pub fn pushpop(&mut self, x: f64) -> Result<f64> {
        let head = self
            .queue
            .pop_front()
            .ok_or(RunRegError::EmptyQueue { operation: "pushpop" })?;
        self.queue.push_back(x);
        self.mean += (x - head) / self.queue.len() as f64;
        Ok(head)
    }
}

impl FromIterator<f64> for RunningMean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let queue: VecDeque<f64> = iter.into_iter().collect();
        let mean = if queue.is_empty() {
            0.0
        } else {
            queue.iter().sum::<f64>() / queue.len() as f64
        };
        Self { queue, mean }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_mean_is_zero() {
        let rm = RunningMean::new();
        assert_eq!(rm.len(), 0);
        assert!(rm.is_empty());
        assert_eq!(rm.mean(), 0.0);

        let rm = RunningMean::from_values(&[]);
        assert_eq!(rm.mean(), 0.0);
    }

    #[test]
    fn test_from_values() {
        let rm = RunningMean::from_values(&[1.0, 2.0, 3.0, 6.0]);
        assert_eq!(rm.len(), 4);
        assert_abs_diff_eq!(rm.mean(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_push() {
        let mut rm = RunningMean::new();
        rm.push(4.0);
        assert_abs_diff_eq!(rm.mean(), 4.0, epsilon = 1e-12);
        rm.push(8.0);
        assert_abs_diff_eq!(rm.mean(), 6.0, epsilon = 1e-12);
        assert_eq!(rm.len(), 2);
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut rm = RunningMean::from_values(&[1.0, 2.0, 6.0]);
        assert_eq!(rm.pop().unwrap(), 1.0);
        assert_abs_diff_eq!(rm.mean(), 4.0, epsilon = 1e-12);
        assert_eq!(rm.pop().unwrap(), 2.0);
        assert_abs_diff_eq!(rm.mean(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pop_last_resets_to_zero() {
        let mut rm = RunningMean::from_values(&[5.0]);
        assert_eq!(rm.pop().unwrap(), 5.0);
        assert!(rm.is_empty());
        assert_eq!(rm.mean(), 0.0);
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut rm = RunningMean::new();
        assert_eq!(
            rm.pop().unwrap_err(),
            RunRegError::EmptyQueue { operation: "pop" }
        );
    }

    #[test]
    fn test_pushpop() {
        let mut rm = RunningMean::from_values(&[1.0, 2.0, 3.0]);
        assert_eq!(rm.pushpop(7.0).unwrap(), 1.0);
        assert_eq!(rm.len(), 3);
        assert_abs_diff_eq!(rm.mean(), 4.0, epsilon = 1e-12);
        assert_eq!(rm.iter().collect::<Vec<_>>(), vec![2.0, 3.0, 7.0]);
    }

    #[test]
    fn test_pushpop_empty_fails() {
        let mut rm = RunningMean::new();
        assert_eq!(
            rm.pushpop(1.0).unwrap_err(),
            RunRegError::EmptyQueue { operation: "pushpop" }
        );
        assert!(rm.is_empty());
    }

    #[test]
    fn test_refill_after_emptying() {
        let mut rm = RunningMean::from_values(&[3.0]);
        rm.pop().unwrap();
        rm.push(10.0);
        rm.push(20.0);
        assert_abs_diff_eq!(rm.mean(), 15.0, epsilon = 1e-12);
    }
}
