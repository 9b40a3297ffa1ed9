//! Input and output grid data model.
//!
//! Purpose
//! - `InputGrid`: caller-owned, read-only source histogram. Rows may share a
//!   single horizontal boundary list or carry one each (ragged detectors);
//!   the vertical boundary list is always shared.
//! - `OutputGrid`: target histogram, allocated once from the requested
//!   boundaries, zero-initialized, mutated only through accumulation and
//!   finalized exactly once by the normalizer. Never resized mid-computation.
//! - Fraction bookkeeping for chained rebins is an explicit sum type
//!   (`FractionState`) rather than a boolean buried in a container, so a
//!   plain grid can never silently pass for a fraction-aware one.
//!
//! All constructors fail fast on invalid axes or shape mismatches; nothing
//! is validated again on the hot path.

use crate::error::{validate_axis, RebinError};

/// Horizontal bin boundaries: one shared list, or one list per row.
#[derive(Clone, Debug)]
pub enum RowEdges {
    Shared(Vec<f64>),
    PerRow(Vec<Vec<f64>>),
}

impl RowEdges {
    /// Boundary list for `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        match self {
            RowEdges::Shared(e) => e,
            RowEdges::PerRow(rows) => &rows[row],
        }
    }
}

/// Whether a grid carries per-bin area fractions from an earlier rebin, and
/// whether its data have already been divided by them ("finalized").
#[derive(Clone, Debug)]
pub enum FractionState {
    Plain,
    Tracked {
        /// Per-row fraction arrays, same shape as the signal.
        values: Vec<Vec<f64>>,
        /// True when signal/variance are already divided by the fractions.
        finalized: bool,
    },
}

/// Source histogram for one rebin. Read-only for the whole computation.
#[derive(Clone, Debug)]
pub struct InputGrid {
    x_edges: RowEdges,
    y_edges: Vec<f64>,
    signal: Vec<Vec<f64>>,
    variance: Vec<Vec<f64>>,
    distribution: bool,
    fractions: FractionState,
}

impl InputGrid {
    /// Build and validate a plain input grid.
    ///
    /// `signal[i][j]` and `variance[i][j]` belong to the cell bounded by
    /// `x_edges(i)[j..=j+1]` and `y_edges[i..=i+1]`. A NaN signal marks an
    /// explicit "no data" cell.
    pub fn new(
        x_edges: RowEdges,
        y_edges: Vec<f64>,
        signal: Vec<Vec<f64>>,
        variance: Vec<Vec<f64>>,
        distribution: bool,
    ) -> Result<Self, RebinError> {
        validate_axis("vertical", &y_edges)?;
        let nrows = y_edges.len() - 1;
        if let RowEdges::PerRow(rows) = &x_edges {
            if rows.len() != nrows {
                return Err(RebinError::RowCountMismatch {
                    expected: nrows,
                    got: rows.len(),
                });
            }
        }
        for row in 0..nrows {
            validate_axis("horizontal", x_edges.row(row))?;
        }
        if signal.len() != nrows {
            return Err(RebinError::RowCountMismatch {
                expected: nrows,
                got: signal.len(),
            });
        }
        if variance.len() != nrows {
            return Err(RebinError::RowCountMismatch {
                expected: nrows,
                got: variance.len(),
            });
        }
        for row in 0..nrows {
            let cells = x_edges.row(row).len() - 1;
            if signal[row].len() != cells {
                return Err(RebinError::ShapeMismatch {
                    row,
                    expected: cells,
                    got: signal[row].len(),
                });
            }
            if variance[row].len() != cells {
                return Err(RebinError::ShapeMismatch {
                    row,
                    expected: cells,
                    got: variance[row].len(),
                });
            }
        }
        Ok(Self {
            x_edges,
            y_edges,
            signal,
            variance,
            distribution,
            fractions: FractionState::Plain,
        })
    }

    /// Attach per-bin fractions from an earlier fractional rebin.
    pub fn with_fractions(
        mut self,
        values: Vec<Vec<f64>>,
        finalized: bool,
    ) -> Result<Self, RebinError> {
        let nrows = self.nrows();
        if values.len() != nrows {
            return Err(RebinError::RowCountMismatch {
                expected: nrows,
                got: values.len(),
            });
        }
        for (row, f) in values.iter().enumerate() {
            let cells = self.ncols(row);
            if f.len() != cells {
                return Err(RebinError::ShapeMismatch {
                    row,
                    expected: cells,
                    got: f.len(),
                });
            }
        }
        self.fractions = FractionState::Tracked { values, finalized };
        Ok(self)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.y_edges.len() - 1
    }

    #[inline]
    pub fn ncols(&self, row: usize) -> usize {
        self.x_edges.row(row).len() - 1
    }

    #[inline]
    pub fn x_edges(&self, row: usize) -> &[f64] {
        self.x_edges.row(row)
    }

    #[inline]
    pub fn y_edges(&self) -> &[f64] {
        &self.y_edges
    }

    #[inline]
    pub fn signal(&self, row: usize) -> &[f64] {
        &self.signal[row]
    }

    #[inline]
    pub fn variance(&self, row: usize) -> &[f64] {
        &self.variance[row]
    }

    #[inline]
    pub fn distribution(&self) -> bool {
        self.distribution
    }

    #[inline]
    pub fn fractions(&self) -> &FractionState {
        &self.fractions
    }
}

/// Target histogram. Row-major `rows × cols` arrays sized from the boundary
/// counts; `error` stays empty until the normalizer has run.
#[derive(Clone, Debug)]
pub struct OutputGrid {
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
    pub signal: Vec<f64>,
    pub variance: Vec<f64>,
    pub error: Vec<f64>,
    pub fraction: Option<Vec<f64>>,
    pub distribution: bool,
}

impl OutputGrid {
    pub(crate) fn new(
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
        distribution: bool,
        track_fractions: bool,
    ) -> Result<Self, RebinError> {
        validate_axis("horizontal", &x_edges)?;
        validate_axis("vertical", &y_edges)?;
        let cells = (x_edges.len() - 1) * (y_edges.len() - 1);
        Ok(Self {
            x_edges,
            y_edges,
            signal: vec![0.0; cells],
            variance: vec![0.0; cells],
            error: Vec::new(),
            fraction: track_fractions.then(|| vec![0.0; cells]),
            distribution,
        })
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.y_edges.len() - 1
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.x_edges.len() - 1
    }

    #[inline]
    pub fn x_edges(&self) -> &[f64] {
        &self.x_edges
    }

    #[inline]
    pub fn y_edges(&self) -> &[f64] {
        &self.y_edges
    }

    /// Flat index of `(row, col)` in the row-major arrays.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.ncols() + col
    }

    #[inline]
    pub fn signal_at(&self, row: usize, col: usize) -> f64 {
        self.signal[self.index(row, col)]
    }

    #[inline]
    pub fn variance_at(&self, row: usize, col: usize) -> f64 {
        self.variance[self.index(row, col)]
    }

    /// Standard error; meaningful only after normalization.
    #[inline]
    pub fn error_at(&self, row: usize, col: usize) -> f64 {
        self.error[self.index(row, col)]
    }

    #[inline]
    pub fn fraction_at(&self, row: usize, col: usize) -> Option<f64> {
        self.fraction.as_ref().map(|f| f[self.index(row, col)])
    }

    /// Convert into an input grid for a chained rebin. Fraction-tracked
    /// outputs carry their fractions forward as finalized (the normalizer
    /// already divided by them).
    pub fn into_input(self) -> Result<InputGrid, RebinError> {
        let nrows = self.nrows();
        let ncols = self.ncols();
        let mut signal = Vec::with_capacity(nrows);
        let mut variance = Vec::with_capacity(nrows);
        for row in 0..nrows {
            let start = row * ncols;
            signal.push(self.signal[start..start + ncols].to_vec());
            // The normalized error channel is authoritative once it exists.
            if self.error.is_empty() {
                variance.push(self.variance[start..start + ncols].to_vec());
            } else {
                variance.push(
                    self.error[start..start + ncols]
                        .iter()
                        .map(|e| e * e)
                        .collect(),
                );
            }
        }
        let grid = InputGrid::new(
            RowEdges::Shared(self.x_edges),
            self.y_edges,
            signal,
            variance,
            self.distribution,
        )?;
        match self.fraction {
            Some(flat) => {
                let rows = flat.chunks(ncols).map(|c| c.to_vec()).collect();
                grid.with_fractions(rows, true)
            }
            None => Ok(grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_grid() -> InputGrid {
        InputGrid::new(
            RowEdges::Shared(vec![0.0, 1.0, 2.0, 3.0]),
            vec![0.0, 1.0],
            vec![vec![2.0, 4.0, 6.0]],
            vec![vec![2.0, 4.0, 6.0]],
            false,
        )
        .expect("valid grid")
    }

    #[test]
    fn accessors_and_shapes() {
        let g = simple_grid();
        assert_eq!(g.nrows(), 1);
        assert_eq!(g.ncols(0), 3);
        assert_eq!(g.signal(0), &[2.0, 4.0, 6.0]);
        assert!(!g.distribution());
        assert!(matches!(g.fractions(), FractionState::Plain));
    }

    #[test]
    fn rejects_non_monotonic_axis() {
        let err = InputGrid::new(
            RowEdges::Shared(vec![0.0, 2.0, 1.0]),
            vec![0.0, 1.0],
            vec![vec![1.0, 1.0]],
            vec![vec![1.0, 1.0]],
            false,
        )
        .unwrap_err();
        assert_eq!(err, RebinError::InvalidAxis { axis: "horizontal" });
    }

    #[test]
    fn rejects_non_finite_axis() {
        let err = InputGrid::new(
            RowEdges::Shared(vec![0.0, 1.0]),
            vec![0.0, f64::NAN],
            vec![vec![1.0]],
            vec![vec![1.0]],
            false,
        )
        .unwrap_err();
        assert_eq!(err, RebinError::InvalidAxis { axis: "vertical" });
    }

    #[test]
    fn rejects_data_length_mismatch() {
        let err = InputGrid::new(
            RowEdges::Shared(vec![0.0, 1.0, 2.0]),
            vec![0.0, 1.0],
            vec![vec![1.0, 2.0, 3.0]],
            vec![vec![1.0, 2.0, 3.0]],
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RebinError::ShapeMismatch {
                row: 0,
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn rejects_row_count_mismatch() {
        // Two data rows against a single-row vertical axis.
        let err = InputGrid::new(
            RowEdges::Shared(vec![0.0, 1.0, 2.0]),
            vec![0.0, 1.0],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RebinError::RowCountMismatch {
                expected: 1,
                got: 2
            }
        );

        // One per-row boundary list too few.
        let err = InputGrid::new(
            RowEdges::PerRow(vec![vec![0.0, 1.0]]),
            vec![0.0, 1.0, 2.0],
            vec![vec![1.0], vec![1.0]],
            vec![vec![1.0], vec![1.0]],
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RebinError::RowCountMismatch {
                expected: 2,
                got: 1
            }
        );

        // Fraction arrays are shape-checked the same way.
        let err = simple_grid()
            .with_fractions(vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 1.0]], false)
            .unwrap_err();
        assert_eq!(
            err,
            RebinError::RowCountMismatch {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn per_row_edges() {
        let g = InputGrid::new(
            RowEdges::PerRow(vec![vec![0.0, 1.0], vec![0.0, 0.5, 1.0]]),
            vec![0.0, 1.0, 2.0],
            vec![vec![1.0], vec![2.0, 3.0]],
            vec![vec![1.0], vec![2.0, 3.0]],
            false,
        )
        .expect("ragged rows are valid");
        assert_eq!(g.ncols(0), 1);
        assert_eq!(g.ncols(1), 2);
    }

    #[test]
    fn fraction_shape_checked() {
        let g = simple_grid();
        let err = g
            .clone()
            .with_fractions(vec![vec![1.0, 1.0]], true)
            .unwrap_err();
        assert!(matches!(err, RebinError::ShapeMismatch { .. }));
        let ok = g.with_fractions(vec![vec![1.0, 0.5, 1.0]], false).unwrap();
        assert!(matches!(
            ok.fractions(),
            FractionState::Tracked { finalized: false, .. }
        ));
    }

    #[test]
    fn output_grid_zero_initialized() {
        let out = OutputGrid::new(vec![0.0, 1.5, 3.0], vec![0.0, 1.0], false, true).unwrap();
        assert_eq!(out.nrows(), 1);
        assert_eq!(out.ncols(), 2);
        assert!(out.signal.iter().all(|&v| v == 0.0));
        assert!(out.fraction.as_ref().unwrap().iter().all(|&v| v == 0.0));
        assert!(out.error.is_empty());
    }
}
