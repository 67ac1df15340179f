//! Application related stuff

use crate::common::*;
use clap::Parser;

/// Returns the number of logical CPUs available to painter threads.
pub fn hardware_concurrency() -> usize {
    std::cmp::max(num_cpus::get(), 1)
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Screen size; 2 to 5 values, one per axis.
    #[arg(
        long = "size",
        short = 's',
        value_name = "NUM",
        num_args = 2..=5,
        required = true,
        help = "Screen size along each axis (2 to 5 values)."
    )]
    pub screen_size: Vec<Int>,

    /// Bar height of the paintbrush.
    #[arg(
        long = "paint-height",
        short = 'p',
        value_name = "NUM",
        default_value_t = 2,
        help = "Height in pixels of the bars painted by the paintbrush."
    )]
    pub paint_height: Int,

    /// Number of passes, -1 for no limit.
    #[arg(
        long = "passes",
        value_name = "NUM",
        default_value_t = 1,
        allow_negative_numbers = true,
        help = "Number of passes over the screen; -1 paints until the time limit."
    )]
    pub max_pass_count: i32,

    /// Samples per pixel in each pass.
    #[arg(
        long = "samples",
        value_name = "NUM",
        default_value_t = 16,
        help = "Samples per pixel in each pass."
    )]
    pub samples_per_pixel: usize,

    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 uses all logical CPUs)."
    )]
    n_threads: usize,

    /// Stop painting after this many seconds.
    #[arg(
        long = "time-limit",
        value_name = "SECONDS",
        help = "Stop painting after the given number of seconds."
    )]
    pub time_limit: Option<f64>,

    /// Path prefix of the image files.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "paint.png",
        help = "Write the image to the given PNG file; screens with more than 2 axes are written as slices."
    )]
    pub image_file: String,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Checks option combinations that clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.time_limit {
            if limit.is_nan() || limit <= 0.0 {
                return Err(format!("Time limit {limit} is not positive"));
            }
        } else if self.max_pass_count == -1 {
            return Err(String::from(
                "Unlimited passes (--passes -1) require a time limit (--time-limit)",
            ));
        }
        Ok(())
    }

    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = hardware_concurrency();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}
