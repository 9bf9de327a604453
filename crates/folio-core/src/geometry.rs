#![forbid(unsafe_code)]

//! Geometric primitives.

/// A pixel size reported by the host (viewport or drawing surface).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A zero-area size.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Check if the size has no drawable area.
    ///
    /// Negative and non-finite dimensions count as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Width clamped to a finite, non-negative value.
    #[inline]
    pub fn clamped_width(&self) -> f64 {
        clamp_dimension(self.width)
    }

    /// Height clamped to a finite, non-negative value.
    #[inline]
    pub fn clamped_height(&self) -> f64 {
        clamp_dimension(self.height)
    }
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
