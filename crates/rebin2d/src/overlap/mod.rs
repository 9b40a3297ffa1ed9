//! Overlap computation between one input cell and the output grid.
//!
//! Purpose
//! - Classify the input quadrilateral once (`classify`), bound the candidate
//!   output-cell range (`locate`), then dispatch to the cheapest intersector
//!   that is exact for that shape class. The closed set of shapes is a
//!   tagged enum dispatching to free functions; no virtual calls on the hot
//!   path.
//!
//! The three intersectors agree on overlap areas to floating precision; the
//! fast paths exist because a rebin may evaluate millions of candidate
//! (input-cell, output-cell) pairs and the general clipper costs
//! O(vertices) per pair.

mod classify;
mod general;
mod locate;
mod rect;
mod trapezoid;

pub use classify::{classify, QuadShape};
pub use general::general_intersections;
pub use locate::{locate, Region};
pub use rect::rectangle_intersections;
pub use trapezoid::trapezoid_y_intersections;

/// One overlap contribution: output cell indices plus the shared area.
/// Produced by an intersector call and consumed immediately by the engine;
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaInfo {
    pub row: usize,
    pub col: usize,
    pub area: f64,
}
