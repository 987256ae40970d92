//! Plain value types shared by the measurement, resolution and smoothing steps.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A displacement in the sink's native units (pixels for the scene host)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset2D {
    pub x: f64,
    pub y: f64,
}

impl Offset2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise product with a base size (fraction -> absolute units)
    #[inline]
    pub fn scale(self, base: Size) -> Self {
        Self {
            x: self.x * base.width,
            y: self.y * base.height,
        }
    }

    /// Round both axes to `precision` decimal digits
    #[inline]
    pub fn round_to(self, precision: u32) -> Self {
        Self {
            x: round_to(self.x, precision),
            y: round_to(self.y, precision),
        }
    }
}

impl Add for Offset2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Offset2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Rendered width and height of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replace non-finite dimensions with zero
    pub fn sanitized(self) -> Self {
        Self {
            width: finite_or_zero(self.width),
            height: finite_or_zero(self.height),
        }
    }
}

impl Sub for Size {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// A scroll-progress value paired with the offset fraction reached there
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub progress: f64,
    pub offset: Offset2D,
}

impl Breakpoint {
    pub const fn new(progress: f64, x: f64, y: f64) -> Self {
        Self {
            progress,
            offset: Offset2D::new(x, y),
        }
    }
}

/// Round `value` to `precision` decimal digits (half away from zero)
#[inline]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // Keep -0.0 out of the output so equal positions compare and print equal
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235, 0), 1.0);
        assert_eq!(round_to(-0.001, 2), 0.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
        assert_eq!(round_to(42.0, 12), 42.0);
    }

    #[test]
    fn test_scale() {
        let offset = Offset2D::new(0.5, -0.25).scale(Size::new(200.0, 400.0));
        assert_eq!(offset, Offset2D::new(100.0, -100.0));
    }

    #[test]
    fn test_sanitized() {
        let size = Size::new(f64::NAN, f64::INFINITY).sanitized();
        assert_eq!(size, Size::new(0.0, 0.0));
    }
}
