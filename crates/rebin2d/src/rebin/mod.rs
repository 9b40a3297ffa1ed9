//! The rebinning engine: per-cell dispatch, parallel accumulation, hooks.
//!
//! Purpose
//! - Drive the overlap layer over every input cell and accumulate the
//!   area-weighted contributions into a shared output grid, then hand the
//!   grid to the normalizer exactly once.
//!
//! Concurrency model
//! - A data-parallel loop over input rows (rayon). All geometry runs outside
//!   the lock; only the commutative sum into the output arrays is mutually
//!   excluded, so results are deterministic modulo floating-point summation
//!   order. Cancellation is polled once per row: in-flight rows complete,
//!   then `RebinError::Cancelled` is raised and the caller discards the
//!   output.

mod normalize;

use std::sync::Mutex;

use rayon::prelude::*;

use crate::error::RebinError;
use crate::geom::Quadrilateral;
use crate::grid::{FractionState, InputGrid, OutputGrid};
use crate::overlap::{
    classify, general_intersections, locate, rectangle_intersections, trapezoid_y_intersections,
    AreaInfo, QuadShape,
};

pub use normalize::normalize;

/// Engine configuration.
///
/// The alignment tolerance is an empirical constant tuned to typical
/// detector-geometry coordinate magnitudes (sub-millimeter to meter scale);
/// callers working at very different scales should adjust it.
#[derive(Clone, Copy, Debug)]
pub struct RebinCfg {
    /// Absolute tolerance for the axis-alignment classification.
    pub eps_align: f64,
    /// Request per-output-cell area-fraction tracking. Silently downgraded
    /// (with a warning) when the input carries no fraction data.
    pub track_fractions: bool,
    /// Allow the parallel row loop.
    pub parallel: bool,
    /// Below this row count the sequential path is used even when
    /// `parallel` is set.
    pub min_rows_for_parallel: usize,
}

impl Default for RebinCfg {
    fn default() -> Self {
        Self {
            eps_align: 1e-10,
            track_fractions: false,
            parallel: true,
            min_rows_for_parallel: 8,
        }
    }
}

/// Progress and cancellation callbacks supplied by the orchestration layer.
/// Both are invoked at most once per input row.
pub trait RebinHooks: Sync {
    /// Called after a row's contributions have landed in the output grid.
    fn row_done(&self, _row: usize) {}
    /// Polled at the start of each row.
    fn cancelled(&self) -> bool {
        false
    }
}

/// Hooks that report nothing and never cancel.
pub struct NoHooks;

impl RebinHooks for NoHooks {}

/// Supplies the quadrilateral for each input cell. The default source builds
/// axis-aligned cells straight from the grid boundaries; the instrument
/// geometry layer can substitute arbitrary per-cell corners through this
/// seam.
pub trait QuadSource: Sync {
    fn quad(&self, row: usize, col: usize) -> Quadrilateral;
}

/// Axis-aligned cells from the input grid's own boundaries.
pub struct GridQuads<'a> {
    input: &'a InputGrid,
}

impl<'a> GridQuads<'a> {
    pub fn new(input: &'a InputGrid) -> Self {
        Self { input }
    }
}

impl QuadSource for GridQuads<'_> {
    #[inline]
    fn quad(&self, row: usize, col: usize) -> Quadrilateral {
        let x = self.input.x_edges(row);
        let y = self.input.y_edges();
        Quadrilateral::from_extents(x[col], x[col + 1], y[row], y[row + 1])
    }
}

/// One scaled contribution waiting for the locked accumulation.
struct Contribution {
    idx: usize,
    signal: f64,
    variance: f64,
    fraction: f64,
}

/// Rebin `input` onto the given output boundaries with default quads and no
/// hooks.
pub fn rebin(
    input: &InputGrid,
    x_out: &[f64],
    y_out: &[f64],
    cfg: &RebinCfg,
) -> Result<OutputGrid, RebinError> {
    rebin_with(input, x_out, y_out, cfg, &GridQuads::new(input), &NoHooks)
}

/// Rebin with an explicit quad source and hooks.
///
/// Output boundaries are validated before any accumulation; the returned
/// grid is already normalized (errors computed, density and fraction
/// normalization applied).
pub fn rebin_with<Q: QuadSource, H: RebinHooks>(
    input: &InputGrid,
    x_out: &[f64],
    y_out: &[f64],
    cfg: &RebinCfg,
    quads: &Q,
    hooks: &H,
) -> Result<OutputGrid, RebinError> {
    let track = match (cfg.track_fractions, input.fractions()) {
        (false, _) => false,
        (true, FractionState::Tracked { .. }) => true,
        (true, FractionState::Plain) => {
            tracing::warn!(
                "fraction tracking requested but the input carries no fraction data; \
                 continuing without it"
            );
            false
        }
    };
    let mut out = OutputGrid::new(x_out.to_vec(), y_out.to_vec(), input.distribution(), track)?;

    let nrows = input.nrows();
    let ncols_out = out.ncols();
    let run_parallel = cfg.parallel && nrows >= cfg.min_rows_for_parallel;
    tracing::debug!(rows = nrows, parallel = run_parallel, "rebin start");

    {
        let sink = Mutex::new(&mut out);
        let row_job = |row: usize| -> Result<(), RebinError> {
            if hooks.cancelled() {
                return Err(RebinError::Cancelled);
            }
            let contribs = process_row(input, quads, row, x_out, y_out, ncols_out, cfg);
            {
                // The only mutually excluded statement: a commutative sum.
                let mut g = sink.lock().unwrap_or_else(|e| e.into_inner());
                for c in &contribs {
                    g.signal[c.idx] += c.signal;
                    g.variance[c.idx] += c.variance;
                    if let Some(f) = g.fraction.as_mut() {
                        f[c.idx] += c.fraction;
                    }
                }
            }
            hooks.row_done(row);
            Ok(())
        };
        if run_parallel {
            (0..nrows).into_par_iter().try_for_each(row_job)?;
        } else {
            for row in 0..nrows {
                row_job(row)?;
            }
        }
    }
    // All workers have joined; the single-threaded pass may run.
    normalize(&mut out);
    Ok(out)
}

/// Geometric work for one input row. Runs outside any lock.
fn process_row<Q: QuadSource>(
    input: &InputGrid,
    quads: &Q,
    row: usize,
    x_out: &[f64],
    y_out: &[f64],
    ncols_out: usize,
    cfg: &RebinCfg,
) -> Vec<Contribution> {
    let mut contribs = Vec::new();
    let mut infos: Vec<AreaInfo> = Vec::new();
    let sig_row = input.signal(row);
    let var_row = input.variance(row);
    let x_in = input.x_edges(row);

    for col in 0..input.ncols(row) {
        let raw_signal = sig_row[col];
        // NaN is the explicit "no data" sentinel; never treated as zero.
        if raw_signal.is_nan() {
            continue;
        }
        let quad = quads.quad(row, col);
        let in_area = quad.area();
        if in_area <= 0.0 {
            continue;
        }
        let bbox = quad.bbox();
        let Some(region) = locate(&bbox, x_out, y_out) else {
            continue;
        };

        infos.clear();
        match classify(&quad, cfg.eps_align) {
            QuadShape::Rectangle => {
                rectangle_intersections(&bbox, &region, x_out, y_out, &mut infos)
            }
            QuadShape::TrapezoidY => {
                trapezoid_y_intersections(&quad, &region, x_out, y_out, &mut infos)
            }
            QuadShape::TrapezoidX | QuadShape::General => {
                general_intersections(&quad.to_polygon(), &region, x_out, y_out, &mut infos)
            }
        }
        if infos.is_empty() {
            continue;
        }

        let mut signal = raw_signal;
        let mut variance = var_row[col];
        let mut in_weight = 1.0;
        if let FractionState::Tracked { values, finalized } = input.fractions() {
            let f = values[row][col];
            in_weight = f;
            if *finalized {
                // Undo the earlier division by the fraction so the values
                // are extensive again.
                signal *= f;
                variance *= f * f;
            }
        }
        if input.distribution() {
            // Rates become extensive counts before area weighting; the
            // normalizer divides by the *output* widths afterwards.
            let width = x_in[col + 1] - x_in[col];
            signal *= width;
            variance *= width * width;
        }

        for ai in &infos {
            let weight = ai.area / in_area;
            contribs.push(Contribution {
                idx: ai.row * ncols_out + ai.col,
                signal: signal * weight,
                variance: variance * weight * weight,
                fraction: weight * in_weight,
            });
        }
    }
    contribs
}
