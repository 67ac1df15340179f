//! Bar Paintbrush

use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Mutable paintbrush state. Only accessed while holding the lock.
struct BarState {
    /// Index of the next pixel to dispense.
    current_pixel: usize,

    /// Position in the pass cycle.
    pass_state: PassState,

    /// Counters.
    statistics: Statistics,

    /// When the current pass started.
    pass_start_time: Option<Instant>,
}

/// Paintbrush that paints the screen in bars `paint_height` pixels tall
/// along every axis except the first, scanning the first axis fully inside
/// each bar.
pub struct BarPaintbrush<const N: usize> {
    /// Screen size.
    screen_size: [Int; N],

    /// All screen pixels in painting order. Never modified after construction.
    pixels: Vec<Pixel<N>>,

    /// Maximum number of passes; -1 for no limit.
    max_pass_count: i32,

    /// Cursor, counters and timing.
    state: Mutex<BarState>,
}

impl<const N: usize> BarPaintbrush<N> {
    /// Create a new `BarPaintbrush`.
    ///
    /// * `screen_size`    - Extent along each axis; all must be positive.
    /// * `paint_height`   - Bar height; must be positive.
    /// * `max_pass_count` - Number of passes to paint, or -1 for no limit.
    pub fn new(screen_size: [Int; N], paint_height: Int, max_pass_count: i32) -> Result<Self, String> {
        check_screen(&screen_size, paint_height)?;
        if !(max_pass_count == -1 || max_pass_count > 0) {
            return Err(format!("Error paintbrush max pass count {max_pass_count}"));
        }

        let pixels = partition_screen(&screen_size, paint_height)?;

        info!(
            "Paintbrush {} with paint height {paint_height}: {} pixels per pass",
            to_string(&screen_size),
            pixels.len()
        );

        Ok(Self {
            screen_size,
            pixels,
            max_pass_count,
            state: Mutex::new(BarState {
                current_pixel: 0,
                pass_state: PassState::AwaitingFirstPass,
                statistics: Statistics {
                    pass_count: 1,
                    ..Default::default()
                },
                pass_start_time: None,
            }),
        })
    }

    /// Returns the number of pixels painted in each pass.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns where the paintbrush is in its pass cycle.
    pub fn state(&self) -> PassState {
        self.lock().pass_state
    }

    /// Acquire the state lock. An assertion failing inside a critical section
    /// poisons the mutex; the counters are still consistent so the guard is
    /// recovered.
    fn lock(&self) -> MutexGuard<'_, BarState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<const N: usize> Paintbrush<N> for BarPaintbrush<N> {
    fn screen_size(&self) -> &[Int; N] {
        &self.screen_size
    }

    fn first_pass(&self) {
        let mut state = self.lock();

        debug_assert_eq!(state.pass_state, PassState::AwaitingFirstPass);

        state.pass_start_time = Some(Instant::now());
        state.pass_state = PassState::InPass;
    }

    fn next_pixel(
        &self,
        previous_pixel_ray_count: i32,
        previous_pixel_sample_count: i32,
    ) -> Option<Pixel<N>> {
        let mut state = self.lock();

        debug_assert!(
            state.pass_state != PassState::AwaitingFirstPass,
            "next_pixel called before first_pass"
        );

        state.statistics.ray_count += previous_pixel_ray_count as i64;
        state.statistics.sample_count += previous_pixel_sample_count as i64;

        if state.pass_state == PassState::Finished {
            return None;
        }

        if state.current_pixel < self.pixels.len() {
            let pixel = self.pixels[state.current_pixel];
            state.current_pixel += 1;
            state.statistics.pixel_count += 1;
            return Some(pixel);
        }

        state.pass_state = PassState::PassComplete;
        None
    }

    fn next_pass(&self) -> bool {
        let mut state = self.lock();

        assert_eq!(
            state.current_pixel,
            self.pixels.len(),
            "next_pass called before the pass was drained"
        );
        let start = match state.pass_start_time {
            Some(start) => start,
            None => panic!("next_pass called before first_pass"),
        };

        let now = Instant::now();
        state.statistics.previous_pass_duration = now.duration_since(start);
        state.pass_start_time = Some(now);

        state.current_pixel = 0;

        debug!(
            "Pass {} finished in {:.3} s",
            state.statistics.pass_count,
            state.statistics.previous_pass_duration.as_secs_f64()
        );

        if state.statistics.pass_count == self.max_pass_count as i64 {
            state.pass_state = PassState::Finished;
            return false;
        }

        state.statistics.pass_count += 1;
        state.pass_state = PassState::InPass;

        true
    }

    fn statistics(&self) -> Statistics {
        self.lock().statistics
    }
}
