//! Candidate output-region bounding via binary search.

use crate::geom::Aabb;
use std::ops::Range;

/// Contiguous candidate cell ranges, one per axis. Every output cell that
/// could possibly overlap the input polygon lies inside this region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub cols: Range<usize>,
    pub rows: Range<usize>,
}

/// Bound the candidate cells for a polygon with bounding box `bbox` against
/// sorted output boundary arrays. `None` when the box lies wholly outside
/// the output domain (touching the domain edge counts as outside: the
/// overlap there has zero area).
pub fn locate(bbox: &Aabb, x_edges: &[f64], y_edges: &[f64]) -> Option<Region> {
    let cols = axis_range(bbox.xmin, bbox.xmax, x_edges)?;
    let rows = axis_range(bbox.ymin, bbox.ymax, y_edges)?;
    Some(Region { cols, rows })
}

fn axis_range(lo: f64, hi: f64, edges: &[f64]) -> Option<Range<usize>> {
    let ncells = edges.len() - 1;
    if hi <= edges[0] || lo >= edges[ncells] {
        return None;
    }
    // First cell whose upper edge exceeds `lo`.
    let start = edges.partition_point(|&e| e <= lo).saturating_sub(1);
    // One past the last cell whose lower edge is below `hi`.
    let end = edges.partition_point(|&e| e < hi).min(ncells);
    if start < end {
        Some(start..end)
    } else {
        None
    }
}
