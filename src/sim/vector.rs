//! 2D point/offset type shared by every actor
//!
//! `Vector` is a plain `Copy` value, so reassigning `pos` or `speed` never
//! aliases another actor's state.

use glam::DVec2;

use crate::SimError;

/// Position, size or velocity in tile units
pub type Vector = DVec2;

/// Named arithmetic used by actor behaviour code
pub trait VectorOps {
    /// Component-wise sum, returning a new vector
    fn plus(self, other: Vector) -> Vector;
    /// Scale both components, returning a new vector
    fn times(self, factor: f64) -> Vector;
}

impl VectorOps for DVec2 {
    #[inline]
    fn plus(self, other: Vector) -> Vector {
        DVec2::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    fn times(self, factor: f64) -> Vector {
        DVec2::new(self.x * factor, self.y * factor)
    }
}

/// Reject vectors with NaN or infinite components
pub fn ensure_finite(field: &'static str, v: Vector) -> Result<Vector, SimError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SimError::InvalidVector {
            field,
            x: v.x,
            y: v.y,
        })
    }
}
