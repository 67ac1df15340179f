//! Common

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// An N-dimensional screen coordinate identifying one unit of render work.
pub type Pixel<const N: usize> = [i16; N];

/// The largest screen extent along a single axis that fits in a `Pixel`.
pub const MAX_SCREEN_EXTENT: Int = i16::MAX as Int + 1;

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

/// Clamp the given value to the closed interval `[low, high]`.
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T: PartialOrd>(val: T, low: T, high: T) -> T {
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Apply the sRGB transfer curve to a linear value.
///
/// * `value` - The value.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Returns the product of all the extents as an `i64` so large N-dimensional
/// screens do not overflow.
///
/// * `sizes` - The extents.
pub fn multiply_all(sizes: &[Int]) -> i64 {
    sizes.iter().map(|&s| s as i64).product()
}

/// Formats a list of values as `(a, b, c)` for messages.
///
/// * `values` - The values.
pub fn to_string<T: std::fmt::Display>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn clamp_keeps_value_inside_interval() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-5, 0, 3), 0);
        assert_eq!(clamp(2, 0, 3), 2);
    }

    #[test]
    fn multiply_all_does_not_overflow_i32() {
        assert_eq!(multiply_all(&[1 << 16, 1 << 16]), 1_i64 << 32);
        assert_eq!(multiply_all(&[4, 3, 2]), 24);
    }

    #[test]
    fn gamma_correct_is_linear_near_zero() {
        assert!(approx_eq!(Float, gamma_correct(0.001), 0.01292, epsilon = 1e-6));
        assert!(approx_eq!(Float, gamma_correct(1.0), 1.0, epsilon = 1e-5));
    }

    #[test]
    fn to_string_formats_tuples() {
        assert_eq!(to_string(&[4, 3]), "(4, 3)");
    }
}
