// =============================================================================
// Error Types
// =============================================================================
//
// Every fallible operation in the library returns `Result<T>`, which is
// `std::result::Result<T, RunRegError>`. Errors are raised at the point of
// violation and handed back unchanged; nothing is retried or swallowed.
//
// Most of these are usage-order or data-sufficiency errors (popping an empty
// window, querying a model before `fit`), not transient conditions.
//
// =============================================================================

use thiserror::Error;

/// Result type alias used throughout the library.
pub type Result<T> = std::result::Result<T, RunRegError>;

/// Errors produced by the running statistics and the regression model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunRegError {
    /// The x and y sequences handed to `fit`/`from_slices` differ in length.
    #[error("length mismatch: x has {x_len} elements but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// `pop` or `pushpop` on an empty window.
    #[error("cannot {operation} from an empty queue")]
    EmptyQueue { operation: &'static str },

    /// A model operation was called before `fit`.
    #[error("model must be fitted before calling this method")]
    NotFitted,

    /// Too few points for the slope and intercept to be defined.
    #[error("too few points to fit: need at least {required}, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// XᵀX could not be inverted during the closed-form fit.
    #[error("singular design matrix: {0}")]
    SingularDesign(String),

    /// An argument is outside its valid range.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
