//! Fast path: axis-aligned rectangle against the rectangular output grid.
//!
//! Overlap width and height are each one clamp-and-subtract, and the column
//! widths are identical across all candidate rows. Precomputing them once
//! turns the per-cell cost into a single multiply after an
//! O(rows + columns) setup.

use super::{AreaInfo, Region};
use crate::geom::Aabb;

/// Emit (row, col, area) triples for a rectangular input cell `bbox`.
pub fn rectangle_intersections(
    bbox: &Aabb,
    region: &Region,
    x_edges: &[f64],
    y_edges: &[f64],
    out: &mut Vec<AreaInfo>,
) {
    let mut widths = Vec::with_capacity(region.cols.len());
    for col in region.cols.clone() {
        let w = bbox.xmax.min(x_edges[col + 1]) - bbox.xmin.max(x_edges[col]);
        widths.push(w);
    }
    for row in region.rows.clone() {
        let h = bbox.ymax.min(y_edges[row + 1]) - bbox.ymin.max(y_edges[row]);
        if h <= 0.0 {
            continue;
        }
        for (k, col) in region.cols.clone().enumerate() {
            let area = widths[k] * h;
            if area > 0.0 {
                out.push(AreaInfo { row, col, area });
            }
        }
    }
}
