// =============================================================================
// Error Mapping
// =============================================================================
//
// `RunRegError` and `PyErr` are both foreign to this crate, so conversion is
// an explicit function used with `map_err`.
//
// =============================================================================

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::PyErr;

use runreg_core::RunRegError;

/// Empty-window errors become `IndexError` (what `deque.popleft()` raises);
/// everything else is a `ValueError`.
pub(crate) fn to_py_err(err: RunRegError) -> PyErr {
    match err {
        RunRegError::EmptyQueue { .. } => PyIndexError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}
