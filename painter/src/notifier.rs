//! Painter Notifier

use paint_core::color::Color;
use paint_core::common::*;

/// Receives painting progress from the painter threads. Called concurrently
/// from every painter thread; two threads never report the same pixel at the
/// same time within a pass.
pub trait PainterNotifier<const N: usize>: Send + Sync {
    /// A painter thread is about to paint a pixel.
    ///
    /// * `thread_number` - Index of the painter thread.
    /// * `pixel`         - The pixel.
    fn pixel_before(&self, thread_number: usize, pixel: &Pixel<N>);

    /// A painter thread has painted a pixel.
    ///
    /// * `thread_number` - Index of the painter thread.
    /// * `pixel`         - The pixel.
    /// * `color`         - Average color of the samples that hit something, over all passes.
    /// * `coverage`      - Fraction of samples that hit something, over all passes.
    fn pixel_after(&self, thread_number: usize, pixel: &Pixel<N>, color: &Color, coverage: Float);

    /// Painting failed.
    ///
    /// * `msg` - The error message.
    fn error_message(&self, msg: &str);
}
