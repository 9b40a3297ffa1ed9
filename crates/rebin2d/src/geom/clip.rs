//! Convex-convex polygon intersection via an edge-chasing walk.
//!
//! Purpose
//! - Provide the single general clipping primitive behind the fallback
//!   intersector. Both inputs must be convex; the result is their overlap
//!   region or `None` when they do not share positive area.
//!
//! Algorithm
//! - O'Rourke's linear-time walk: one cursor per polygon, destination
//!   vertices classified by the exact sign of a cross product, parametric
//!   edge intersection, and an advance rule table driven by the two edge
//!   orientations plus an "which polygon is currently inside" flag. The walk
//!   stops after at most 2·(|P|+|Q|) edge-pair visits, or as soon as it
//!   returns to the first crossing point. If no crossing is ever found the
//!   polygons either nest (containment fallback) or are disjoint.
//! - Degenerate contacts carrying no area (shared edges, tangential vertex
//!   touches, slivers) collapse to `None`; they are never errors. A vertex
//!   resting exactly on the other polygon's boundary while real overlap
//!   exists elsewhere does not disturb the walk: only touches that change
//!   sides count as crossings.

use super::types::{cross2, orient, ConvexPolygon, Point2};

/// Which polygon's boundary is currently inside the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InFlag {
    Unknown,
    PInside,
    QInside,
}

/// Outcome of intersecting two directed edges.
#[derive(Clone, Copy, Debug)]
enum SegCross {
    /// Proper interior crossing.
    Proper(Point2),
    /// Touch at an endpoint of at least one segment.
    Endpoint(Point2),
    /// Segments lie on one line and share at least a point.
    Collinear,
    None,
}

/// Parametric intersection of segments `p1→p2` and `q1→q2`.
///
/// Classification is exact (sign comparisons on f64, no tolerance); callers
/// reject degenerate results through the area check on the final polygon.
fn seg_seg(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> SegCross {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let denom = cross2(d1, d2);
    if denom == 0.0 {
        // Parallel. Collinear only if q1 sits on the carrier line of p.
        if orient(p1, p2, q1) != 0.0 {
            return SegCross::None;
        }
        // 1D overlap test along the dominant axis.
        let (a0, a1, b0, b1) = if d1.x.abs() >= d1.y.abs() {
            (p1.x, p2.x, q1.x, q2.x)
        } else {
            (p1.y, p2.y, q1.y, q2.y)
        };
        let (alo, ahi) = if a0 <= a1 { (a0, a1) } else { (a1, a0) };
        let (blo, bhi) = if b0 <= b1 { (b0, b1) } else { (b1, b0) };
        if alo <= bhi && blo <= ahi {
            return SegCross::Collinear;
        }
        return SegCross::None;
    }
    let s = cross2(q1 - p1, d2) / denom;
    let t = cross2(q1 - p1, d1) / denom;
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
        return SegCross::None;
    }
    let pt = p1 + d1 * s;
    if s > 0.0 && s < 1.0 && t > 0.0 && t < 1.0 {
        SegCross::Proper(pt)
    } else {
        SegCross::Endpoint(pt)
    }
}

/// Vertices in canonical walk order (counter-oriented rings are reversed so
/// both cursors advance the same way).
fn walk_order(p: &ConvexPolygon) -> Vec<Point2> {
    let mut v = p.vertices().to_vec();
    if p.signed_area() < 0.0 {
        v.reverse();
    }
    v
}

/// Intersection of two convex polygons.
///
/// Returns the overlap polygon, or `None` when the overlap has fewer than 3
/// vertices or zero area. Invalid inputs are treated as empty.
pub fn intersection(p: &ConvexPolygon, q: &ConvexPolygon) -> Option<ConvexPolygon> {
    if !p.is_valid() || !q.is_valid() {
        return None;
    }
    let pv = walk_order(p);
    let qv = walk_order(q);
    let n = pv.len();
    let m = qv.len();

    let mut a = 0usize;
    let mut b = 0usize;
    let mut aa = 0usize;
    let mut ba = 0usize;
    let mut inflag = InFlag::Unknown;
    let mut out: Vec<Point2> = Vec::with_capacity(n + m);
    let mut first_cross: Option<Point2> = None;

    loop {
        let a1 = (a + n - 1) % n;
        let b1 = (b + m - 1) % m;
        let adir = pv[a] - pv[a1];
        let bdir = qv[b] - qv[b1];
        let edge_cross = cross2(adir, bdir);
        // Destination-vertex classifications (exact sign, no tolerance).
        let a_left_of_b = orient(qv[b1], qv[b], pv[a]);
        let b_left_of_a = orient(pv[a1], pv[a], qv[b]);

        let crossing = match seg_seg(pv[a1], pv[a], qv[b1], qv[b]) {
            SegCross::Proper(pt) => Some(pt),
            // An endpoint touch counts as a crossing only when it actually
            // transitions, i.e. one destination is strictly inside the
            // other polygon's edge half-plane. A tangential graze (a vertex
            // resting on the other boundary) is not a boundary crossing.
            SegCross::Endpoint(pt) => {
                (a_left_of_b > 0.0 || b_left_of_a > 0.0).then_some(pt)
            }
            SegCross::Collinear => {
                if adir.dot(&bdir) < 0.0 {
                    // Oppositely oriented shared edge: the polygons sit on
                    // opposite sides, overlap degenerates to a segment.
                    return None;
                }
                None
            }
            SegCross::None => None,
        };
        if let Some(pt) = crossing {
            if inflag == InFlag::Unknown && first_cross.is_none() {
                // First crossing: restart the visit counters so the walk
                // is guaranteed a full loop around the overlap region.
                aa = 0;
                ba = 0;
                first_cross = Some(pt);
                out.push(pt);
            } else if let Some(f0) = first_cross {
                if out.len() > 1 && (pt - f0).norm() < 1e-10 {
                    // Back at the first crossing: the ring is closed.
                    break;
                }
                out.push(pt);
            }
            if a_left_of_b > 0.0 {
                inflag = InFlag::PInside;
            } else if b_left_of_a > 0.0 {
                inflag = InFlag::QInside;
            }
        }

        // Parallel and separated: no overlap possible.
        if edge_cross == 0.0 && a_left_of_b < 0.0 && b_left_of_a < 0.0 {
            return None;
        }

        let collinear_edges = edge_cross == 0.0 && a_left_of_b == 0.0 && b_left_of_a == 0.0;
        let advance_p = if collinear_edges {
            // Advance the cursor that is not flagged inside, without output.
            inflag != InFlag::PInside
        } else if edge_cross >= 0.0 {
            b_left_of_a > 0.0
        } else {
            a_left_of_b <= 0.0
        };

        if advance_p {
            if !collinear_edges && inflag == InFlag::PInside {
                out.push(pv[a]);
            }
            aa += 1;
            a = (a + 1) % n;
        } else {
            if !collinear_edges && inflag == InFlag::QInside {
                out.push(qv[b]);
            }
            ba += 1;
            b = (b + 1) % m;
        }

        if !((aa < n || ba < m) && aa < 2 * n && ba < 2 * m) {
            break;
        }
    }

    if first_cross.is_none() {
        // No boundary crossings: either one polygon nests in the other or
        // they are disjoint.
        if q.contains(p) {
            return Some(p.clone());
        }
        if p.contains(q) {
            return Some(q.clone());
        }
        return None;
    }

    finish(out)
}

/// Deduplicate the collected ring and apply the validity predicate.
fn finish(mut ring: Vec<Point2>) -> Option<ConvexPolygon> {
    ring.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    while ring.len() > 1 {
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if (first - last).norm() < 1e-12 {
            ring.pop();
        } else {
            break;
        }
    }
    let poly = ConvexPolygon::new(ring);
    if poly.is_valid() {
        Some(poly)
    } else {
        None
    }
}
