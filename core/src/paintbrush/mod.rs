//! Paintbrush

mod bar;
mod partition;
mod statistics;

// Re-export
pub use bar::*;
pub use partition::*;
pub use statistics::*;

use crate::common::*;

/// Where a paintbrush is in its pass cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassState {
    /// Constructed; `first_pass()` has not been called.
    AwaitingFirstPass,

    /// Pixels are being dispensed.
    InPass,

    /// Every pixel of the current pass has been dispensed.
    PassComplete,

    /// The last allowed pass is done; no further pass will start.
    Finished,
}

/// Hands out the pixels of an N-dimensional screen to painter threads, pass
/// after pass, and keeps track of the work they report.
pub trait Paintbrush<const N: usize>: Send + Sync {
    /// Returns the screen size.
    fn screen_size(&self) -> &[Int; N];

    /// Starts timing the first pass. Called once by the owner before any
    /// painter thread requests a pixel.
    fn first_pass(&self);

    /// Records the ray and sample counts of the caller's previous pixel and
    /// returns the next pixel of the current pass, or `None` once the pass
    /// has been fully dispensed.
    ///
    /// * `previous_pixel_ray_count`    - Rays traced for the previous pixel (0 on the first call).
    /// * `previous_pixel_sample_count` - Samples taken for the previous pixel (0 on the first call).
    fn next_pixel(
        &self,
        previous_pixel_ray_count: i32,
        previous_pixel_sample_count: i32,
    ) -> Option<Pixel<N>>;

    /// Rolls over to the next pass once every painter has drained the current
    /// one. Returns `false` when the maximum pass count has been reached.
    fn next_pass(&self) -> bool;

    /// Returns a consistent snapshot of the counters.
    fn statistics(&self) -> Statistics;
}
