//! Axis-aligned rectangle tests
//!
//! Everything in the level is a box: actors are `pos`/`size` rectangles and
//! terrain is the unit grid. Overlap is strict, so boxes that only share an
//! edge do not collide.

use std::ops::Range;

use super::vector::Vector;

/// Edges of an axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn from_pos_size(pos: Vector, size: Vector) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + size.x,
            bottom: pos.y + size.y,
        }
    }
}

/// Strict overlap on both axes; shared edges are not a collision
#[inline]
pub fn bounds_overlap(a: &Bounds, b: &Bounds) -> bool {
    b.left < a.right && b.right > a.left && b.top < a.bottom && b.bottom > a.top
}

/// Grid rows and columns touched by a rectangle: `[floor, ceil)` on each axis
///
/// Callers must have rejected negative coordinates already.
pub fn cell_span(pos: Vector, size: Vector) -> (Range<usize>, Range<usize>) {
    let rows = pos.y.floor() as usize..(pos.y + size.y).ceil() as usize;
    let cols = pos.x.floor() as usize..(pos.x + size.x).ceil() as usize;
    (rows, cols)
}
