//! Basic planar types: points, bounding boxes, convex polygons, quadrilaterals.
//!
//! Conventions
//! - `Point2` is a plain `nalgebra::Vector2<f64>`; no wrapper type.
//! - Polygons carry their vertices in ring order. The canonical ordering
//!   produced by `Quadrilateral` is lower-left, lower-right, upper-right,
//!   upper-left; predicates derive the winding sign from the shoelace sum
//!   instead of assuming it.
//! - A polygon that has fewer than 3 vertices or zero area is *not* an error:
//!   it is the canonical "no overlap" outcome of clipping.

use nalgebra::Vector2;

pub type Point2 = Vector2<f64>;

/// Slack used by containment predicates so that boundary points count as
/// inside. Area/validity checks use exact comparisons instead.
pub(crate) const CONTAIN_EPS: f64 = 1e-12;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Aabb {
    /// Smallest box covering `pts`. Empty input yields an inverted box that
    /// reports non-positive width/height.
    pub fn of_points(pts: &[Point2]) -> Self {
        let mut b = Aabb {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
        };
        for p in pts {
            b.xmin = b.xmin.min(p.x);
            b.xmax = b.xmax.max(p.x);
            b.ymin = b.ymin.min(p.y);
            b.ymax = b.ymax.max(p.y);
        }
        b
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Cross product of 2D vectors `a × b` (z-component).
#[inline]
pub(crate) fn cross2(a: Point2, b: Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of `c` relative to the directed segment `a → b`.
/// Positive: left of the segment; negative: right; zero: collinear.
#[inline]
pub(crate) fn orient(a: Point2, b: Point2, c: Point2) -> f64 {
    cross2(b - a, c - a)
}

/// Convex polygon as an ordered vertex ring.
///
/// Invariants (for a *valid* polygon):
/// - at least 3 vertices, not collinear in aggregate;
/// - strictly positive area.
///
/// Construction does not enforce validity; `is_valid` is the single predicate
/// clipping code uses to decide "no intersection".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexPolygon {
    verts: Vec<Point2>,
}

impl ConvexPolygon {
    #[inline]
    pub fn new(verts: Vec<Point2>) -> Self {
        Self { verts }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Signed shoelace sum halved. The sign encodes the winding direction.
    pub fn signed_area(&self) -> f64 {
        let n = self.verts.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            acc += cross2(a, b);
        }
        0.5 * acc
    }

    /// Unsigned enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Winding sign: +1, -1, or 0 for a degenerate ring.
    #[inline]
    pub fn winding(&self) -> f64 {
        self.signed_area().signum()
    }

    /// Valid iff ≥3 vertices enclosing a strictly positive area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.verts.len() >= 3 && self.area() > 0.0
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::of_points(&self.verts)
    }

    /// True when `p` lies inside or on the boundary. Works for either winding
    /// by orienting every edge test with the polygon's own winding sign.
    pub fn contains_point(&self, p: Point2) -> bool {
        let n = self.verts.len();
        if n < 3 {
            return false;
        }
        let w = self.winding();
        if w == 0.0 {
            return false;
        }
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            if w * orient(a, b, p) < -CONTAIN_EPS {
                return false;
            }
        }
        true
    }

    /// True when every vertex of `other` lies inside or on `self`. Used as
    /// the clipper's fallback when the edge walk records no crossings.
    pub fn contains(&self, other: &ConvexPolygon) -> bool {
        !other.is_empty() && other.vertices().iter().all(|&p| self.contains_point(p))
    }
}

/// Four-cornered convex cell with distinguished corners.
///
/// The corner order (lower-left, lower-right, upper-right, upper-left) is the
/// crate-wide ring convention; the fast-path classifier reads axis alignment
/// straight off the corner coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrilateral {
    pub ll: Point2,
    pub lr: Point2,
    pub ur: Point2,
    pub ul: Point2,
}

impl Quadrilateral {
    #[inline]
    pub fn new(ll: Point2, lr: Point2, ur: Point2, ul: Point2) -> Self {
        Self { ll, lr, ur, ul }
    }

    /// Axis-aligned cell covering `[x0, x1] × [y0, y1]`.
    #[inline]
    pub fn from_extents(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self {
            ll: Point2::new(x0, y0),
            lr: Point2::new(x1, y0),
            ur: Point2::new(x1, y1),
            ul: Point2::new(x0, y1),
        }
    }

    #[inline]
    pub fn corners(&self) -> [Point2; 4] {
        [self.ll, self.lr, self.ur, self.ul]
    }

    /// Unsigned area via the shoelace sum over the four corners.
    pub fn area(&self) -> f64 {
        let s = cross2(self.ll, self.lr)
            + cross2(self.lr, self.ur)
            + cross2(self.ur, self.ul)
            + cross2(self.ul, self.ll);
        0.5 * s.abs()
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::of_points(&self.corners())
    }

    #[inline]
    pub fn to_polygon(&self) -> ConvexPolygon {
        ConvexPolygon::new(vec![self.ll, self.lr, self.ur, self.ul])
    }
}
