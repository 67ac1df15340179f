//! Pixel Accumulation

use paint_core::color::Color;
use paint_core::common::*;
use paint_core::global_index::GlobalIndex;
use std::sync::{Mutex, PoisonError};

/// Samples accumulated for one pixel over all passes.
#[derive(Default)]
struct PixelSum {
    color_sum: Color,
    hit_sample_sum: u32,
    all_sample_sum: u32,
}

/// Accumulated colors of all pixels of the screen.
pub struct Pixels<const N: usize> {
    global_index: GlobalIndex<N>,

    /// Only one painter touches a given pixel within a pass, so the locks are
    /// never contended.
    pixels: Vec<Mutex<PixelSum>>,
}

impl<const N: usize> Pixels<N> {
    /// Create a new `Pixels` buffer.
    ///
    /// * `screen_size` - Screen size.
    pub fn new(screen_size: &[Int; N]) -> Self {
        let global_index = GlobalIndex::new(screen_size);
        let pixels = (0..global_index.count()).map(|_| Mutex::default()).collect();
        Self {
            global_index,
            pixels,
        }
    }

    /// Add the samples of one pass to a pixel. Returns the average color of
    /// the samples that hit something and the fraction of samples that hit.
    ///
    /// * `pixel`       - The pixel.
    /// * `color`       - Sum of the hit sample colors.
    /// * `hit_samples` - Number of samples that hit something.
    /// * `all_samples` - Number of samples taken.
    pub fn add_color_and_samples(
        &self,
        pixel: &Pixel<N>,
        color: Color,
        hit_samples: u32,
        all_samples: u32,
    ) -> (Color, Float) {
        let mut p = self.pixels[self.global_index.compute(pixel)]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        p.all_sample_sum += all_samples;
        p.hit_sample_sum += hit_samples;
        p.color_sum += color;

        let coverage = if p.all_sample_sum > 0 {
            p.hit_sample_sum as Float / p.all_sample_sum as Float
        } else {
            0.0
        };
        let result = if p.hit_sample_sum > 0 {
            p.color_sum / p.hit_sample_sum as Float
        } else {
            p.color_sum
        };

        (result, coverage)
    }
}
