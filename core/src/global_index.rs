//! Global Index

use crate::common::*;

/// Maps N-dimensional pixel coordinates to a linear index with axis 0
/// varying fastest.
#[derive(Clone, Debug)]
pub struct GlobalIndex<const N: usize> {
    /// Stride for each axis.
    strides: [i64; N],

    /// Total number of pixels.
    count: i64,
}

impl<const N: usize> GlobalIndex<N> {
    /// Create a new `GlobalIndex`.
    ///
    /// * `sizes` - Extent along each axis; all must be positive.
    pub fn new(sizes: &[Int; N]) -> Self {
        assert!(sizes.iter().all(|&s| s > 0), "sizes {} are not positive", to_string(sizes));

        let mut strides = [0_i64; N];
        let mut stride = 1_i64;
        for i in 0..N {
            strides[i] = stride;
            stride *= sizes[i] as i64;
        }

        Self {
            strides,
            count: stride,
        }
    }

    /// Returns the total number of pixels.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Returns the linear index of a pixel.
    ///
    /// * `p` - The pixel.
    #[inline]
    pub fn compute(&self, p: &Pixel<N>) -> usize {
        let index: i64 = p
            .iter()
            .zip(self.strides.iter())
            .map(|(&c, &s)| c as i64 * s)
            .sum();
        debug_assert!(index >= 0 && index < self.count);
        index as usize
    }
}
