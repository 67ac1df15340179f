#[macro_use]
extern crate log;

mod images;
mod scene;

use clap::Parser;
use crossbeam_channel::{select, tick};
use images::*;
use indicatif::{ProgressBar, ProgressStyle};
use paint_core::app::*;
use paint_core::color::Color;
use paint_core::common::*;
use paint_core::paintbrush::*;
use scene::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Background color of the scene.
const BACKGROUND_COLOR: Color = Color::new(0.03, 0.13, 0.3);

/// How often the progress bar is refreshed.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    let result = match options.screen_size.len() {
        2 => render::<2>(&options),
        3 => render::<3>(&options),
        4 => render::<4>(&options),
        5 => render::<5>(&options),
        n => Err(format!("Unsupported screen dimension {n}")),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Paint an N-dimensional screen and write it as image slices.
///
/// * `options` - Application options.
fn render<const N: usize>(options: &Options) -> Result<(), String> {
    options.validate()?;

    let screen_size: [Int; N] = options
        .screen_size
        .as_slice()
        .try_into()
        .map_err(|_| format!("Expected {N} screen sizes, got {}", options.screen_size.len()))?;

    let paintbrush = BarPaintbrush::new(screen_size, options.paint_height, options.max_pass_count)?;
    let shader = SphereShader::new(screen_size);
    let (error_tx, error_rx) = crossbeam_channel::unbounded();
    let images = Images::new(screen_size, BACKGROUND_COLOR, error_tx);
    let stop = AtomicBool::new(false);
    let thread_count = options.threads();

    let progress = create_progress_bar(options, paintbrush.pixel_count() as u64)?;
    progress.set_message("Painting");

    let start = Instant::now();
    let mut errors = vec![];

    crossbeam::scope(|scope| {
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        {
            let (images, shader, paintbrush, stop) = (&images, &shader, &paintbrush, &stop);
            scope.spawn(move |_| {
                painter::paint(
                    images,
                    options.samples_per_pixel,
                    shader,
                    paintbrush,
                    thread_count,
                    stop,
                );
                let _ = done_tx.send(());
            });
        }

        let ticker = tick(PROGRESS_INTERVAL);
        loop {
            select! {
                recv(ticker) -> _ => {
                    let statistics = paintbrush.statistics();
                    progress.set_position(statistics.pixel_count as u64);
                    progress.set_message(format!(
                        "Pass {}, {:.1} rays per sample",
                        statistics.pass_count,
                        statistics.rays_per_sample()
                    ));

                    if let Some(limit) = options.time_limit {
                        if !stop.load(Ordering::SeqCst) && start.elapsed().as_secs_f64() >= limit {
                            info!("Time limit of {limit} s reached, stopping");
                            stop.store(true, Ordering::SeqCst);
                        }
                    }
                },
                recv(error_rx) -> msg => {
                    if let Ok(msg) = msg {
                        error!("{msg}");
                        errors.push(msg);
                    }
                },
                recv(done_rx) -> _ => break,
            }
        }
    })
    .map_err(|_| String::from("Painter thread panicked"))?;

    errors.extend(error_rx.try_iter());

    let statistics = paintbrush.statistics();
    progress.set_position(statistics.pixel_count as u64);
    if !errors.is_empty() {
        progress.abandon_with_message("Painting failed");
        return Err(errors.join("\n"));
    }
    progress.finish_with_message("Painting complete");

    info!(
        "Painted in {:.3} s: {statistics}",
        start.elapsed().as_secs_f64()
    );

    let paths = images.write_to_files(&options.image_file)?;
    if !options.quiet {
        println!("Wrote {} image(s) starting with {}", paths.len(), paths[0]);
    }

    Ok(())
}

/// Create the progress bar. Bounded passes count pixels over all passes;
/// unbounded painting only shows a spinner.
///
/// * `options`         - Application options.
/// * `pixels_per_pass` - Pixels painted in each pass.
fn create_progress_bar(options: &Options, pixels_per_pass: u64) -> Result<ProgressBar, String> {
    if options.quiet {
        return Ok(ProgressBar::hidden());
    }

    if options.max_pass_count > 0 {
        let progress = ProgressBar::new(pixels_per_pass * options.max_pass_count as u64);
        let style = ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} pixels {msg}",
        )
        .map_err(|e| e.to_string())?;
        progress.set_style(style);
        Ok(progress)
    } else {
        let progress = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {pos} pixels {msg}")
            .map_err(|e| e.to_string())?;
        progress.set_style(style);
        Ok(progress)
    }
}
