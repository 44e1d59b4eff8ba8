// =============================================================================
// Batch Solvers
// =============================================================================
//
// Non-incremental fits. Only closed-form simple OLS lives here; the running
// model calls it once at `fit` time and then switches to O(1) updates.
//
// =============================================================================

mod ols;

pub use ols::{fit_ols, OlsFit};
