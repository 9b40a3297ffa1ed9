//! Area-weighted rebinning of 2D histograms onto arbitrary rectilinear grids.
//!
//! Input cells (axis-aligned by default, arbitrary convex quadrilaterals via
//! [`rebin::QuadSource`]) are intersected with the output grid; each overlap
//! redistributes signal in proportion to overlap area over input-cell area,
//! with variance weighted by the square of that fraction. Three intersection
//! paths exist, picked per input cell: exact interval arithmetic for
//! rectangles, a gridline lookup table for y-trapezoids, and a general convex
//! polygon clip for everything else. All paths agree within floating-point
//! tolerance; the fast paths are just cheaper.

pub mod error;
pub mod geom;
pub mod grid;
pub mod overlap;
pub mod rebin;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::RebinError;
pub use grid::{FractionState, InputGrid, OutputGrid, RowEdges};
pub use rebin::{rebin, rebin_with, NoHooks, RebinCfg, RebinHooks};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::RebinError;
    pub use crate::geom::{Aabb, ConvexPolygon, Point2, Quadrilateral};
    pub use crate::grid::{FractionState, InputGrid, OutputGrid, RowEdges};
    pub use crate::rebin::{
        rebin, rebin_with, GridQuads, NoHooks, QuadSource, RebinCfg, RebinHooks,
    };
}
