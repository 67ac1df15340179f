//! Painter

use crate::notifier::*;
use crate::pixels::*;
use crate::sampler::*;
use crate::shader::*;
use paint_core::color::Color;
use paint_core::common::*;
use paint_core::paintbrush::Paintbrush;
use paint_core::rng::RNG;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;

/// Everything the painter threads share.
struct PaintData<'a, const N: usize> {
    notifier: &'a dyn PainterNotifier<N>,
    shader: &'a dyn Shader<N>,
    paintbrush: &'a dyn Paintbrush<N>,
    sampler: StratifiedJitteredSampler<N>,
    pixels: Pixels<N>,
    barrier: Barrier,
    stop: &'a AtomicBool,
    error_caught: AtomicBool,
    stop_painting: AtomicBool,
}

/// Paint the screen with `thread_count` threads until the paintbrush runs
/// out of passes or `stop` is set. Errors are not returned; they are
/// reported through `notifier.error_message()`.
///
/// * `notifier`          - Receives painted pixels and errors.
/// * `samples_per_pixel` - Samples per pixel in each pass.
/// * `shader`            - Computes sample colors.
/// * `paintbrush`        - Hands out the pixels.
/// * `thread_count`      - Number of painter threads.
/// * `stop`              - Set to stop painting; also set by the painter on errors.
pub fn paint<const N: usize>(
    notifier: &dyn PainterNotifier<N>,
    samples_per_pixel: usize,
    shader: &dyn Shader<N>,
    paintbrush: &dyn Paintbrush<N>,
    thread_count: usize,
    stop: &AtomicBool,
) {
    if let Err(e) = paint_threads(
        notifier,
        samples_per_pixel,
        shader,
        paintbrush,
        thread_count,
        stop,
    ) {
        notifier.error_message(&format!("Painter error:\n{e}"));
    }
}

fn paint_threads<const N: usize>(
    notifier: &dyn PainterNotifier<N>,
    samples_per_pixel: usize,
    shader: &dyn Shader<N>,
    paintbrush: &dyn Paintbrush<N>,
    thread_count: usize,
    stop: &AtomicBool,
) -> Result<(), String> {
    if thread_count < 1 {
        return Err(format!(
            "Painter thread count ({thread_count}) must be greater than 0"
        ));
    }
    if paintbrush.screen_size() != shader.screen_size() {
        return Err(format!(
            "The paintbrush screen size {} is not equal to the shader screen size {}",
            to_string(paintbrush.screen_size()),
            to_string(shader.screen_size())
        ));
    }

    let data = PaintData {
        notifier,
        shader,
        paintbrush,
        sampler: StratifiedJitteredSampler::new(samples_per_pixel)?,
        pixels: Pixels::new(paintbrush.screen_size()),
        barrier: Barrier::new(thread_count),
        stop,
        error_caught: AtomicBool::new(false),
        stop_painting: AtomicBool::new(false),
    };

    info!(
        "Painting {} with {thread_count} threads, {} samples per pixel",
        to_string(paintbrush.screen_size()),
        data.sampler.sample_count()
    );

    paintbrush.first_pass();

    crossbeam::scope(|scope| {
        for thread_number in 0..thread_count {
            let data = &data;
            scope.spawn(move |_| work_thread(thread_number, data));
        }
    })
    .map_err(|_| String::from("Painter thread panicked"))?;

    info!("Painting finished: {}", paintbrush.statistics());

    Ok(())
}

/// Paint passes until told to stop. All painter threads meet twice at the
/// barrier after each pass: once after draining it, and once after thread 0
/// has decided whether another pass starts.
fn work_thread<const N: usize>(thread_number: usize, data: &PaintData<'_, N>) {
    let mut rng = RNG::new(thread_number as u64);
    let mut samples = Vec::with_capacity(data.sampler.sample_count());

    loop {
        let painted = panic::catch_unwind(AssertUnwindSafe(|| {
            paint_pixels(thread_number, &mut rng, &mut samples, data)
        }));
        let error = match painted {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("Painter error:\n{e}")),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        if let Some(msg) = error {
            error!("Painter thread {thread_number}: {msg}");
            data.stop.store(true, Ordering::SeqCst);
            data.error_caught.store(true, Ordering::SeqCst);
            data.notifier.error_message(&msg);
            data.barrier.wait();
            return;
        }

        data.barrier.wait();

        // Threads that caught an error have left after the first wait.
        if data.error_caught.load(Ordering::SeqCst) {
            return;
        }

        if thread_number == 0
            && (data.stop.load(Ordering::SeqCst) || !data.paintbrush.next_pass())
        {
            data.stop_painting.store(true, Ordering::SeqCst);
        }

        data.barrier.wait();

        if data.stop_painting.load(Ordering::SeqCst) {
            return;
        }
    }
}

/// Paint pixels of the current pass until the paintbrush has none left or
/// painting is stopped.
fn paint_pixels<const N: usize>(
    thread_number: usize,
    rng: &mut RNG,
    samples: &mut Vec<[Float; N]>,
    data: &PaintData<'_, N>,
) -> Result<(), String> {
    let mut ray_count = 0;
    let mut sample_count = 0;

    while !data.stop.load(Ordering::Relaxed) {
        let pixel = match data.paintbrush.next_pixel(ray_count, sample_count) {
            Some(pixel) => pixel,
            None => break,
        };

        data.notifier.pixel_before(thread_number, &pixel);

        data.sampler.generate(rng, samples);
        sample_count = samples.len() as i32;
        ray_count = 0;

        let mut hit_sample_count = 0;
        let mut color = Color::ZERO;
        for sample in samples.iter() {
            let mut point = [0.0; N];
            for i in 0..N {
                point[i] = pixel[i] as Float + sample[i];
            }
            if let Some(c) = data.shader.trace(&point, rng, &mut ray_count)? {
                if c.has_nans() {
                    warn!("Not-a-number color returned for pixel {}", to_string(&pixel));
                    continue;
                }
                color += c;
                hit_sample_count += 1;
            }
        }

        let (pixel_color, coverage) = data.pixels.add_color_and_samples(
            &pixel,
            color,
            hit_sample_count,
            sample_count as u32,
        );

        data.notifier
            .pixel_after(thread_number, &pixel, &pixel_color, coverage);
    }

    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("Painter error:\n{s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("Painter error:\n{s}")
    } else {
        String::from("Unknown painter error")
    }
}
