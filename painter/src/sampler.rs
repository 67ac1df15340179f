//! Stratified Jittered Sampler

use paint_core::common::*;
use paint_core::rng::{ONE_MINUS_EPSILON, RNG};

/// Generates one jittered sample in each cell of a regular grid covering the
/// unit hypercube.
#[derive(Clone, Debug)]
pub struct StratifiedJitteredSampler<const N: usize> {
    /// Number of strata along each axis.
    strata: usize,

    /// Total number of samples; `strata^N`.
    sample_count: usize,
}

impl<const N: usize> StratifiedJitteredSampler<N> {
    /// Create a new `StratifiedJitteredSampler` with at least
    /// `samples_per_pixel` samples, rounded up to the next `k^N`.
    ///
    /// * `samples_per_pixel` - Requested number of samples.
    pub fn new(samples_per_pixel: usize) -> Result<Self, String> {
        if samples_per_pixel < 1 {
            return Err(format!(
                "Stratified jittered sample count ({samples_per_pixel}) is not positive"
            ));
        }

        let mut strata = 1_usize;
        while strata.pow(N as u32) < samples_per_pixel {
            strata += 1;
        }

        Ok(Self {
            strata,
            sample_count: strata.pow(N as u32),
        })
    }

    /// Returns the number of samples generated per call.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Fill `samples` with one jittered point per stratum.
    ///
    /// * `rng`     - Random number generator.
    /// * `samples` - Receives the samples; previous contents are discarded.
    pub fn generate(&self, rng: &mut RNG, samples: &mut Vec<[Float; N]>) {
        let inv_strata = 1.0 / self.strata as Float;

        samples.clear();
        samples.reserve(self.sample_count);

        for index in 0..self.sample_count {
            let mut cell = index;
            let mut sample = [0.0; N];
            for s in sample.iter_mut() {
                let stratum = cell % self.strata;
                cell /= self.strata;
                *s = min((stratum as Float + rng.uniform_float()) * inv_strata, ONE_MINUS_EPSILON);
            }
            samples.push(sample);
        }
    }
}
