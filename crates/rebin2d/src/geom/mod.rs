//! Planar geometry primitives and the convex clipper.
//!
//! Purpose
//! - Everything the overlap layer needs about points, boxes, polygons and
//!   quadrilaterals, plus the single general intersection routine.
//! - Kept deliberately small: no concave shapes, no holes, no 3D.

mod clip;
mod types;

pub use clip::intersection;
pub use types::{Aabb, ConvexPolygon, Point2, Quadrilateral};
