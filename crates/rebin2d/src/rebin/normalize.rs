//! Final single-threaded pass over the accumulated output grid.

use crate::grid::OutputGrid;

/// Convert accumulated variance to standard error and apply density and
/// fraction normalization.
///
/// Must run only after every accumulation worker has joined. Density data
/// are divided by the *output* cell's own width (the engine made them
/// extensive using input widths, since one input cell generally splits
/// across output cells of different widths). Fraction-tracked grids are
/// finalized: signal and error are divided by the accumulated fraction,
/// cells with zero fraction stay zero.
pub fn normalize(out: &mut OutputGrid) {
    out.error = out.variance.iter().map(|v| v.sqrt()).collect();

    if out.distribution {
        let widths: Vec<f64> = out.x_edges().windows(2).map(|w| w[1] - w[0]).collect();
        let ncols = out.ncols();
        for row in 0..out.nrows() {
            for (col, w) in widths.iter().enumerate() {
                let idx = row * ncols + col;
                out.signal[idx] /= w;
                out.error[idx] /= w;
            }
        }
    }

    if let Some(frac) = &out.fraction {
        for idx in 0..out.signal.len() {
            let f = frac[idx];
            if f > 0.0 {
                out.signal[idx] /= f;
                out.error[idx] /= f;
            }
        }
    }
}
