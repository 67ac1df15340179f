//! Paint Statistics

use std::fmt;
use std::time::Duration;

/// A consistent snapshot of the paintbrush counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// The current pass, starting at 1.
    pub pass_count: i64,

    /// Pixels dispensed over all passes.
    pub pixel_count: i64,

    /// Rays reported by painters over all passes.
    pub ray_count: i64,

    /// Samples reported by painters over all passes.
    pub sample_count: i64,

    /// Wall-clock duration of the most recently completed pass.
    pub previous_pass_duration: Duration,
}

impl Statistics {
    /// Returns the average number of samples per dispensed pixel.
    pub fn samples_per_pixel(&self) -> f64 {
        if self.pixel_count > 0 {
            self.sample_count as f64 / self.pixel_count as f64
        } else {
            0.0
        }
    }

    /// Returns the average number of rays per sample.
    pub fn rays_per_sample(&self) -> f64 {
        if self.sample_count > 0 {
            self.ray_count as f64 / self.sample_count as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pass {}, {} pixels, {} rays, {} samples, previous pass {:.3} s",
            self.pass_count,
            self.pixel_count,
            self.ray_count,
            self.sample_count,
            self.previous_pass_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_of_empty_statistics_are_zero() {
        let s = Statistics::default();
        assert_eq!(s.samples_per_pixel(), 0.0);
        assert_eq!(s.rays_per_sample(), 0.0);
    }

    #[test]
    fn averages_divide_counters() {
        let s = Statistics {
            pass_count: 1,
            pixel_count: 4,
            ray_count: 32,
            sample_count: 16,
            previous_pass_duration: Duration::ZERO,
        };
        assert_eq!(s.samples_per_pixel(), 4.0);
        assert_eq!(s.rays_per_sample(), 2.0);
    }
}
