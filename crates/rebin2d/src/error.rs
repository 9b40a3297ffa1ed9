//! Error taxonomy for the rebinning kernel.
//!
//! Geometric degeneracies (clips collapsing below 3 vertices, zero areas)
//! are handled locally by skipping the contribution and never appear here.
//! Nothing in this kernel is retried.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebinError {
    /// A boundary array is not strictly increasing or contains non-finite
    /// values. Raised before any accumulation begins.
    #[error("{axis} axis boundaries must be finite and strictly increasing")]
    InvalidAxis { axis: &'static str },

    /// A row's data length disagrees with the cell count derived from its
    /// boundary array. Precondition violation; no partial processing.
    #[error("row {row}: {got} data values do not match {expected} cells")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A grid's row count disagrees with the count derived from the
    /// vertical boundary array. Same precondition class as `ShapeMismatch`,
    /// but for the outer dimension.
    #[error("expected {expected} data rows, got {got}")]
    RowCountMismatch { expected: usize, got: usize },

    /// Caller-triggered cancellation, raised after completing in-flight row
    /// work. The partially filled output is for the caller to discard.
    #[error("computation cancelled")]
    Cancelled,
}

/// Checks a boundary array: at least two edges, all finite, strictly
/// increasing.
pub(crate) fn validate_axis(axis: &'static str, edges: &[f64]) -> Result<(), RebinError> {
    if edges.len() < 2 {
        return Err(RebinError::InvalidAxis { axis });
    }
    for w in edges.windows(2) {
        if !w[0].is_finite() || !w[1].is_finite() || w[0] >= w[1] {
            return Err(RebinError::InvalidAxis { axis });
        }
    }
    Ok(())
}
