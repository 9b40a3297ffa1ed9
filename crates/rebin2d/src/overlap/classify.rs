//! O(1) shape classification of an input quadrilateral.

use crate::geom::Quadrilateral;

/// Shape of an input cell relative to the output grid's axes.
///
/// `TrapezoidY` has horizontal top/bottom edges and (possibly) sloped sides;
/// `TrapezoidX` the transpose. Only `Rectangle` and `TrapezoidY` have
/// dedicated fast paths; `TrapezoidX` shares the general one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadShape {
    Rectangle,
    TrapezoidX,
    TrapezoidY,
    General,
}

/// Classify `quad` using the absolute alignment tolerance `eps`.
///
/// The tolerance is configurable because it is an empirical constant tuned
/// to typical coordinate magnitudes; extreme scalings may need a different
/// value (see `RebinCfg`).
pub fn classify(quad: &Quadrilateral, eps: f64) -> QuadShape {
    let flat_bottom = (quad.ll.y - quad.lr.y).abs() < eps;
    let flat_top = (quad.ul.y - quad.ur.y).abs() < eps;
    let vertical_left = (quad.ll.x - quad.ul.x).abs() < eps;
    let vertical_right = (quad.lr.x - quad.ur.x).abs() < eps;
    if flat_bottom && flat_top {
        if vertical_left && vertical_right {
            QuadShape::Rectangle
        } else {
            QuadShape::TrapezoidY
        }
    } else if vertical_left && vertical_right {
        QuadShape::TrapezoidX
    } else {
        QuadShape::General
    }
}
