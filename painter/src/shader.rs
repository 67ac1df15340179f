//! Shader

use paint_core::color::Color;
use paint_core::common::*;
use paint_core::rng::RNG;

/// Computes the light arriving through a point of the screen.
pub trait Shader<const N: usize>: Send + Sync {
    /// Returns the screen size the shader projects onto.
    fn screen_size(&self) -> &[Int; N];

    /// Trace one sample.
    ///
    /// Returns `None` when the sample hits nothing.
    ///
    /// * `point`     - Screen position of the sample in pixel units.
    /// * `rng`       - Random number generator of the calling thread.
    /// * `ray_count` - Incremented for every ray traced.
    fn trace(&self, point: &[Float; N], rng: &mut RNG, ray_count: &mut i32) -> Result<Option<Color>, String>;
}
