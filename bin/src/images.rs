//! Image Slices

use crossbeam_channel::Sender;
use image::{ImageBuffer, ImageFormat, Rgb};
use paint_core::color::{interpolation, Color};
use paint_core::common::*;
use paint_core::global_index::GlobalIndex;
use painter::PainterNotifier;
use regex::Regex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// Collects painted pixels as 8-bit sRGB and writes the screen as 2D image
/// slices. Error messages are forwarded to the thread owning the receiver.
pub struct Images<const N: usize> {
    global_index: GlobalIndex<N>,
    screen_size: [Int; N],
    background_color: Color,

    /// Packed `0x00RRGGBB` per pixel.
    pixels: Vec<AtomicU32>,

    errors: Sender<String>,
}

impl<const N: usize> Images<N> {
    /// Create a new `Images`.
    ///
    /// * `screen_size`      - The screen size.
    /// * `background_color` - Color blended in where samples miss.
    /// * `errors`           - Receives painter error messages.
    pub fn new(screen_size: [Int; N], background_color: Color, errors: Sender<String>) -> Self {
        let global_index = GlobalIndex::new(&screen_size);
        let background = pack(background_color.to_srgb8());
        let pixels = (0..global_index.count()).map(|_| AtomicU32::new(background)).collect();
        Self {
            global_index,
            screen_size,
            background_color,
            pixels,
            errors,
        }
    }

    /// Returns the stored 8-bit sRGB color of a pixel.
    ///
    /// * `pixel` - The pixel.
    pub fn pixel(&self, pixel: &Pixel<N>) -> [u8; 3] {
        unpack(self.pixels[self.global_index.compute(pixel)].load(Ordering::Relaxed))
    }

    /// Write one image per slice through axes 0 and 1. A 2D screen is written
    /// to `path`; higher dimensional screens get the indices of the remaining
    /// axes appended to the file stem. Returns the written paths.
    ///
    /// * `path` - Output file path; the extension selects the format.
    pub fn write_to_files(&self, path: &str) -> Result<Vec<String>, String> {
        let extension = get_extension_from_filename(path).map(|e| (e, e.to_lowercase()));
        let (stem, format) = match extension {
            Some((_, e)) if e == ".png" => (&path[..path.len() - 4], ImageFormat::Png),
            Some((_, e)) if e == ".tga" => (&path[..path.len() - 4], ImageFormat::Tga),
            Some((extension, _)) => return Err(format!("Extension {extension} is not supported")),
            None => {
                return Err(format!(
                    "Can't determine file type from suffix of filename {path}"
                ))
            }
        };
        let extension = &path[stem.len()..];

        let width = self.screen_size[0];
        let height = self.screen_size[1];
        let slice_count = multiply_all(&self.screen_size[2..]);

        let mut paths = Vec::with_capacity(slice_count as usize);
        for slice in 0..slice_count {
            let mut pixel: Pixel<N> = [0; N];
            let mut rest = slice;
            for i in 2..N {
                pixel[i] = (rest % self.screen_size[i] as i64) as i16;
                rest /= self.screen_size[i] as i64;
            }

            let slice_path = if N == 2 {
                path.to_string()
            } else {
                let indices: Vec<String> = pixel[2..].iter().map(|c| c.to_string()).collect();
                format!("{stem}_{}{extension}", indices.join("_"))
            };

            let mut imgbuf = ImageBuffer::new(width as u32, height as u32);
            for row in 0..height {
                for x in 0..width {
                    // Axis 1 points up on the screen, rows go down.
                    pixel[0] = x as i16;
                    pixel[1] = (height - 1 - row) as i16;
                    imgbuf.put_pixel(x as u32, row as u32, Rgb(self.pixel(&pixel)));
                }
            }

            info!("Writing image {slice_path} with resolution {width}x{height}");
            if let Err(err) = imgbuf.save_with_format(&slice_path, format) {
                return Err(format!("Error saving output image {slice_path}: {err}."));
            }
            paths.push(slice_path);
        }

        Ok(paths)
    }
}

impl<const N: usize> PainterNotifier<N> for Images<N> {
    fn pixel_before(&self, _thread_number: usize, _pixel: &Pixel<N>) {}

    fn pixel_after(&self, _thread_number: usize, pixel: &Pixel<N>, color: &Color, coverage: Float) {
        let c = interpolation(&self.background_color, color, coverage);
        self.pixels[self.global_index.compute(pixel)].store(pack(c.to_srgb8()), Ordering::Relaxed);
    }

    fn error_message(&self, msg: &str) {
        if self.errors.send(msg.to_string()).is_err() {
            error!("{msg}");
        }
    }
}

fn pack(rgb: [u8; 3]) -> u32 {
    (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

fn unpack(v: u32) -> [u8; 3] {
    [(v >> 16) as u8, (v >> 8) as u8, v as u8]
}

/// Returns regular expression for extracting the file extension; the last
/// period followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").expect("valid file extension regex"))
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()
        .captures(path)
        .and_then(|c| c.get(1).map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("ndpaint_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn extension_is_last_suffix() {
        assert_eq!(get_extension_from_filename("a/b.c/image.png"), Some(".png"));
        assert_eq!(get_extension_from_filename("a/b.c/image"), None);
    }

    #[test]
    fn missed_samples_blend_with_background() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let images = Images::new([2, 2], Color::gray(1.0), tx);

        images.pixel_after(0, &[0, 0], &Color::ZERO, 0.0);
        assert_eq!(images.pixel(&[0, 0]), [255, 255, 255]);

        images.pixel_after(0, &[1, 0], &Color::ZERO, 1.0);
        assert_eq!(images.pixel(&[1, 0]), [0, 0, 0]);
    }

    #[test]
    fn errors_are_forwarded() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let images = Images::new([2, 2], Color::ZERO, tx);
        images.error_message("Painter error:\nboom");
        assert_eq!(rx.try_recv().unwrap(), "Painter error:\nboom");
    }

    #[test]
    fn writes_single_image_for_2d_screen() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let images = Images::new([3, 2], Color::ZERO, tx);
        images.pixel_after(0, &[0, 1], &Color::gray(1.0), 1.0);

        let path = temp_path("flat.png");
        let written = images.write_to_files(&path).unwrap();
        assert_eq!(written, vec![path.clone()]);

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (3, 2));
        // Pixel (0, 1) is the top row.
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn writes_one_slice_per_extra_index() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let images = Images::new([2, 2, 3], Color::ZERO, tx);

        let path = temp_path("volume.png");
        let written = images.write_to_files(&path).unwrap();
        assert_eq!(written.len(), 3);
        for (i, p) in written.iter().enumerate() {
            assert!(p.ends_with(&format!("volume_{i}.png")), "{p}");
            assert!(Path::new(p).exists());
        }
    }

    #[test]
    fn extension_match_ignores_case() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let images = Images::new([2, 2], Color::ZERO, tx);

        let path = temp_path("upper.PNG");
        let written = images.write_to_files(&path).unwrap();
        assert_eq!(written, vec![path.clone()]);
        assert!(Path::new(&path).exists());

        let path = temp_path("upper_volume.Tga");
        let volume = Images::new([2, 2, 2], Color::ZERO, crossbeam_channel::unbounded().0);
        let written = volume.write_to_files(&path).unwrap();
        assert!(written[1].ends_with("upper_volume_1.Tga"), "{}", written[1]);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let images = Images::new([2, 2], Color::ZERO, tx);
        assert!(images.write_to_files("image.bmp").is_err());
        assert!(images.write_to_files("image").is_err());
    }
}
