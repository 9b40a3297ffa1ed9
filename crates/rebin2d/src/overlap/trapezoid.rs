//! Fast path: y-trapezoid (horizontal top/bottom, sloped sides) against the
//! rectangular output grid.
//!
//! The typical shape for angle-dispersive detector geometry: both sides are
//! straight lines spanning the full row height. Both side lines are
//! evaluated once per output gridline the quad spans, giving a lookup table
//! of left/right x-limits per output row boundary. Each output row then
//! contributes a small band quadrilateral whose exact overlap with one
//! output column is a closed-form vertex sequence: the band corners inside
//! the column's x-range plus the interpolated crossings of the column's two
//! vertical boundaries. Its shoelace sum is the exact overlap area; no
//! general clip is invoked.

use super::{AreaInfo, Region};
use crate::geom::{Point2, Quadrilateral};

/// Emit (row, col, area) triples for a y-trapezoid input cell.
///
/// Areas below a machine-epsilon-scaled threshold (relative to the quad's
/// own area) are skipped as numerically indistinguishable from zero.
pub fn trapezoid_y_intersections(
    quad: &Quadrilateral,
    region: &Region,
    x_edges: &[f64],
    y_edges: &[f64],
    out: &mut Vec<AreaInfo>,
) {
    let y0 = 0.5 * (quad.ll.y + quad.lr.y);
    let y1 = 0.5 * (quad.ul.y + quad.ur.y);
    let dy = y1 - y0;
    if dy <= 0.0 {
        return;
    }
    // Side lines as x(y), derived from the corner pairs.
    let left_slope = (quad.ul.x - quad.ll.x) / dy;
    let right_slope = (quad.ur.x - quad.lr.x) / dy;
    let left_at = |y: f64| quad.ll.x + left_slope * (y - y0);
    let right_at = |y: f64| quad.lr.x + right_slope * (y - y0);

    // Lookup table: clamped gridline level plus both x-limits, one entry per
    // output row boundary in the candidate range.
    let mut levels = Vec::with_capacity(region.rows.len() + 1);
    for r in region.rows.start..=region.rows.end {
        let yb = y_edges[r].clamp(y0, y1);
        levels.push((yb, left_at(yb), right_at(yb)));
    }

    let area_tol = f64::EPSILON * quad.area();
    let mut band: Vec<Point2> = Vec::with_capacity(4);
    let mut buf_a: Vec<Point2> = Vec::with_capacity(8);
    let mut buf_b: Vec<Point2> = Vec::with_capacity(8);

    for (k, row) in region.rows.clone().enumerate() {
        let (ylo, xl_lo, xr_lo) = levels[k];
        let (yhi, xl_hi, xr_hi) = levels[k + 1];
        if yhi - ylo <= 0.0 {
            continue;
        }
        band.clear();
        band.push(Point2::new(xl_lo, ylo));
        band.push(Point2::new(xr_lo, ylo));
        band.push(Point2::new(xr_hi, yhi));
        band.push(Point2::new(xl_hi, yhi));
        for col in region.cols.clone() {
            clip_min_x(&band, &mut buf_a, x_edges[col]);
            clip_max_x(&buf_a, &mut buf_b, x_edges[col + 1]);
            let area = shoelace_abs(&buf_b);
            if area > area_tol {
                out.push(AreaInfo { row, col, area });
            }
        }
    }
}

/// Keep the part of `input` with `x >= bound`, interpolating crossings on
/// the sloped edges (horizontal edges clamp trivially).
fn clip_min_x(input: &[Point2], out: &mut Vec<Point2>, bound: f64) {
    clip_x(input, out, bound, true)
}

/// Keep the part of `input` with `x <= bound`.
fn clip_max_x(input: &[Point2], out: &mut Vec<Point2>, bound: f64) {
    clip_x(input, out, bound, false)
}

fn clip_x(input: &[Point2], out: &mut Vec<Point2>, bound: f64, keep_ge: bool) {
    out.clear();
    let n = input.len();
    if n == 0 {
        return;
    }
    let inside = |p: &Point2| {
        if keep_ge {
            p.x >= bound
        } else {
            p.x <= bound
        }
    };
    for i in 0..n {
        let cur = input[i];
        let nxt = input[(i + 1) % n];
        let cur_in = inside(&cur);
        if cur_in {
            out.push(cur);
        }
        if cur_in != inside(&nxt) {
            let t = (bound - cur.x) / (nxt.x - cur.x);
            out.push(Point2::new(bound, cur.y + t * (nxt.y - cur.y)));
        }
    }
}

fn shoelace_abs(verts: &[Point2]) -> f64 {
    let n = verts.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        acc += a.x * b.y - a.y * b.x;
    }
    0.5 * acc.abs()
}
