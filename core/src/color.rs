//! Color

use crate::common::*;
use std::ops::{Add, AddAssign, Div, Mul};

/// Linear RGB color.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Color {
    c: [Float; 3],
}

impl Color {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; 3] };

    /// Create a new `Color`.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Create a gray `Color` with all components set to `v`.
    ///
    /// * `v` - The value.
    pub const fn gray(v: Float) -> Self {
        Self { c: [v, v, v] }
    }

    /// Returns the largest component.
    pub fn max_element(&self) -> Float {
        max(self.c[0], max(self.c[1], self.c[2]))
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Converts to 8-bit sRGB, clamping out of range values.
    pub fn to_srgb8(&self) -> [u8; 3] {
        let byte = |v: Float| clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8;
        [byte(self.c[0]), byte(self.c[1]), byte(self.c[2])]
    }
}

/// Linearly interpolate between two colors.
///
/// * `a` - Color at `t = 0`.
/// * `b` - Color at `t = 1`.
/// * `t` - Interpolation parameter.
pub fn interpolation(a: &Color, b: &Color, t: Float) -> Color {
    *a * (1.0 - t) + *b * t
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.c[0] + other.c[0],
            self.c[1] + other.c[1],
            self.c[2] + other.c[2],
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Self) {
        self.c[0] += other.c[0];
        self.c[1] += other.c[1];
        self.c[2] += other.c[2];
    }
}

impl Mul<Float> for Color {
    type Output = Self;

    fn mul(self, f: Float) -> Self {
        Self::new(self.c[0] * f, self.c[1] * f, self.c[2] * f)
    }
}

impl Div<Float> for Color {
    type Output = Self;

    fn div(self, f: Float) -> Self {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn interpolation_returns_end_points() {
        let a = Color::new(1.0, 0.0, 0.0);
        let b = Color::new(0.0, 0.0, 1.0);
        assert_eq!(interpolation(&a, &b, 0.0), a);
        assert_eq!(interpolation(&a, &b, 1.0), b);

        let mid = interpolation(&a, &b, 0.5);
        assert!(approx_eq!(Float, mid.c[0], 0.5));
        assert!(approx_eq!(Float, mid.c[2], 0.5));
    }

    #[test]
    fn max_element_picks_largest_component() {
        assert_eq!(Color::new(0.2, 0.7, 0.1).max_element(), 0.7);
    }

    #[test]
    fn to_srgb8_clamps() {
        assert_eq!(Color::new(-1.0, 0.0, 2.0).to_srgb8(), [0, 0, 255]);
        assert_eq!(Color::gray(1.0).to_srgb8(), [255, 255, 255]);
    }

    #[test]
    fn division_scales_all_components() {
        let c = Color::new(2.0, 4.0, 6.0) / 2.0;
        assert_eq!(c, Color::new(1.0, 2.0, 3.0));
    }
}
