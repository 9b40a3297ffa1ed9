//! Fallback intersector: general convex clip per candidate output cell.

use super::{AreaInfo, Region};
use crate::geom::{intersection, ConvexPolygon, Quadrilateral};

/// Emit (row, col, area) triples for an arbitrary convex input polygon by
/// clipping it against every candidate cell rectangle. Degenerate clips
/// (slivers, touches) simply contribute nothing.
pub fn general_intersections(
    poly: &ConvexPolygon,
    region: &Region,
    x_edges: &[f64],
    y_edges: &[f64],
    out: &mut Vec<AreaInfo>,
) {
    let area_tol = f64::EPSILON * poly.area();
    for row in region.rows.clone() {
        for col in region.cols.clone() {
            let cell = Quadrilateral::from_extents(
                x_edges[col],
                x_edges[col + 1],
                y_edges[row],
                y_edges[row + 1],
            )
            .to_polygon();
            if let Some(overlap) = intersection(poly, &cell) {
                let area = overlap.area();
                if area > area_tol {
                    out.push(AreaInfo { row, col, area });
                }
            }
        }
    }
}
