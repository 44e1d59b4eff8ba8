// =============================================================================
// Running Statistics
// =============================================================================
//
// O(1)-per-update statistics over a FIFO window:
//
//   - RunningMean:        mean of one queue of numbers
//   - RunningSimpleStats: Var(x), Var(y), Cov(x, y) of a queue of pairs,
//                         built from five RunningMean trackers
//
// Windows are unbounded; the caller decides when to `pop`.
//
// =============================================================================

mod mean;
mod simple_stats;

pub use mean::RunningMean;
pub use simple_stats::RunningSimpleStats;
