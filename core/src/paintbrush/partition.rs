//! Screen Partitioning

use crate::common::*;

/// Walks the coarse grid over every axis except the last with a stride of
/// `paint_height`, then the last axis with a stride of 1, then the axes except
/// the last again with a stride of 1 inside the current coarse cell. For 3
/// dimensions this is the loop nest
///
/// ```text
/// for x in (0..max_x).step_by(paint_height)
///     for y in (0..max_y).step_by(paint_height)
///         for z in 0..max_z
///             for sub_x in x..min(max_x, x + paint_height)
///                 for sub_y in y..min(max_y, y + paint_height)
///                     emit(sub_x, sub_y, z)
/// ```
///
/// Levels `0..N - 1` are the coarse axes, level `N - 1` is the row axis and
/// levels `N..2N - 1` are the fine axes.
struct PixelGenerator<'a, const N: usize> {
    sizes: &'a [Int; N],
    paint_height: Int,
    pixel: Pixel<N>,
    sub_min: [Int; N],
    sub_max: [Int; N],
    pixels: Vec<Pixel<N>>,
}

impl<'a, const N: usize> PixelGenerator<'a, N> {
    fn generate(&mut self, level: usize) {
        if level < N - 1 {
            let mut i = 0;
            while i < self.sizes[level] {
                self.sub_min[level] = i;
                self.sub_max[level] = min(self.sizes[level], i.saturating_add(self.paint_height));
                self.generate(level + 1);
                i = i.saturating_add(self.paint_height);
            }
        } else if level == N - 1 {
            for i in 0..self.sizes[level] {
                self.pixel[level] = i as i16;
                self.generate(level + 1);
            }
        } else {
            let axis = level - N;
            for i in self.sub_min[axis]..self.sub_max[axis] {
                self.pixel[axis] = i as i16;
                if level < 2 * N - 2 {
                    self.generate(level + 1);
                } else {
                    self.pixels.push(self.pixel);
                }
            }
        }
    }
}

/// Returns every pixel of the screen grouped into tiles, in the order of the
/// loop nest described on `PixelGenerator`. The sizes are taken as given; no
/// axis reordering is done here.
///
/// * `sizes`        - Extent along each axis.
/// * `paint_height` - Tile extent along every axis except the last.
pub fn generate_pixels<const N: usize>(sizes: &[Int; N], paint_height: Int) -> Vec<Pixel<N>> {
    assert!(N >= 2);
    assert!(paint_height >= 1);

    let mut generator = PixelGenerator {
        sizes,
        paint_height,
        pixel: [0; N],
        sub_min: [0; N],
        sub_max: [0; N],
        pixels: Vec::with_capacity(multiply_all(sizes) as usize),
    };
    generator.generate(0);

    assert_eq!(generator.pixels.len() as i64, multiply_all(sizes));

    generator.pixels
}

/// Checks the screen parameters shared by the partitioner and paintbrushes.
///
/// * `screen_size`  - Extent along each axis.
/// * `paint_height` - Tile height.
pub fn check_screen<const N: usize>(screen_size: &[Int; N], paint_height: Int) -> Result<(), String> {
    if N < 2 {
        return Err(format!("Paintbrush dimension {N} is less than 2"));
    }
    for (i, &size) in screen_size.iter().enumerate() {
        if size < 1 {
            return Err(format!("Paintbrush size {i} is not positive ({size})"));
        }
        if size > MAX_SCREEN_EXTENT {
            return Err(format!(
                "Paintbrush size {i} ({size}) is greater than {MAX_SCREEN_EXTENT}"
            ));
        }
    }
    if paint_height < 1 {
        return Err(format!("Error paintbrush paint height {paint_height}"));
    }

    let max_pixel_count = isize::MAX as usize / std::mem::size_of::<Pixel<N>>();
    let pixel_count = screen_size
        .iter()
        .try_fold(1_usize, |count, &size| count.checked_mul(size as usize))
        .filter(|&count| count <= max_pixel_count);
    if pixel_count.is_none() {
        return Err(format!(
            "Paintbrush screen {} has too many pixels",
            to_string(screen_size)
        ));
    }

    Ok(())
}

/// Returns the ordered pixel sequence for a screen. The partition is done on
/// the reversed axes so that the last screen axis gets the coarse tiling and
/// axis 0 is the row axis; pixels are returned in the screen's own axis order.
/// For 2D screens axis 1 is flipped so that painting starts at the top-left.
///
/// * `screen_size`  - Extent along each axis.
/// * `paint_height` - Tile height.
pub fn partition_screen<const N: usize>(
    screen_size: &[Int; N],
    paint_height: Int,
) -> Result<Vec<Pixel<N>>, String> {
    check_screen(screen_size, paint_height)?;

    let mut reversed = *screen_size;
    reversed.reverse();

    let mut pixels = generate_pixels(&reversed, paint_height);

    for pixel in pixels.iter_mut() {
        pixel.reverse();
        if N == 2 {
            pixel[1] = (screen_size[1] - 1 - pixel[1] as Int) as i16;
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Returns the coarse tile a pixel belongs to. Axis 0 is the row axis and
    /// does not take part in tiling; axis 1 of 2D screens is flipped back.
    fn tile_key<const N: usize>(p: &Pixel<N>, size: &[Int; N], h: Int) -> Vec<Int> {
        (1..N)
            .map(|i| {
                let c = if N == 2 { size[1] - 1 - p[1] as Int } else { p[i] as Int };
                c / h
            })
            .collect()
    }

    fn check_complete<const N: usize>(size: &[Int; N], pixels: &[Pixel<N>]) {
        assert_eq!(pixels.len() as i64, multiply_all(size));
        let mut seen = HashSet::new();
        for p in pixels {
            for i in 0..N {
                assert!((p[i] as Int) >= 0 && (p[i] as Int) < size[i], "{p:?} out of {size:?}");
            }
            assert!(seen.insert(*p), "{p:?} emitted twice");
        }
    }

    /// Every tile occupies one contiguous run and, inside it, every row
    /// coordinate occupies one contiguous run.
    fn check_contiguous<const N: usize>(size: &[Int; N], h: Int, pixels: &[Pixel<N>]) {
        let keys: Vec<Vec<Int>> = pixels.iter().map(|p| tile_key(p, size, h)).collect();
        let distinct: HashSet<&Vec<Int>> = keys.iter().collect();
        let runs = 1 + keys.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(runs, distinct.len());

        let mut start = 0;
        while start < pixels.len() {
            let mut end = start;
            while end < pixels.len() && keys[end] == keys[start] {
                end += 1;
            }
            let rows = &pixels[start..end];
            let row_runs = 1 + rows.windows(2).filter(|w| w[0][0] != w[1][0]).count();
            assert_eq!(row_runs as Int, size[0]);
            start = end;
        }
    }

    #[test]
    fn four_by_three_with_paint_height_two_is_two_bars() {
        let pixels = partition_screen(&[4, 3], 2).unwrap();
        assert_eq!(
            pixels,
            vec![
                [0, 2], [0, 1], [1, 2], [1, 1], [2, 2], [2, 1], [3, 2], [3, 1],
                [0, 0], [1, 0], [2, 0], [3, 0],
            ]
        );
    }

    #[test]
    fn generate_pixels_follows_loop_nest_for_3d() {
        let sizes = [3, 2, 2];
        let mut expected = vec![];
        for x in (0..3).step_by(2) {
            for y in (0..2).step_by(2) {
                for z in 0..2 {
                    for sub_x in x..std::cmp::min(3, x + 2) {
                        for sub_y in y..std::cmp::min(2, y + 2) {
                            expected.push([sub_x as i16, sub_y as i16, z as i16]);
                        }
                    }
                }
            }
        }
        assert_eq!(generate_pixels(&sizes, 2), expected);
    }

    #[test]
    fn paint_height_larger_than_screen_gives_single_tile() {
        let size = [5, 4];
        let pixels = partition_screen(&size, 100).unwrap();
        check_complete(&size, &pixels);
        let keys: HashSet<Vec<Int>> = pixels.iter().map(|p| tile_key(p, &size, 100)).collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn paint_height_one_scans_rows() {
        let pixels = partition_screen(&[3, 2], 1).unwrap();
        assert_eq!(pixels, vec![[0, 1], [1, 1], [2, 1], [0, 0], [1, 0], [2, 0]]);
    }

    #[test]
    fn partition_is_deterministic() {
        let a = partition_screen(&[7, 5, 3], 2).unwrap();
        let b = partition_screen(&[7, 5, 3], 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_screen_is_rejected() {
        assert!(partition_screen(&[0, 3], 2).is_err());
        assert!(partition_screen(&[4, -1], 2).is_err());
        assert!(partition_screen(&[4, 3], 0).is_err());
        assert!(partition_screen(&[40000, 3], 1).is_err());
        assert!(partition_screen(&[4], 1).is_err());
    }

    #[test]
    fn oversized_screen_is_rejected() {
        let err = check_screen(&[MAX_SCREEN_EXTENT; 4], 2).unwrap_err();
        assert!(err.contains("too many pixels"), "{err}");
        assert!(partition_screen(&[MAX_SCREEN_EXTENT; 5], 2).is_err());
        assert!(check_screen(&[MAX_SCREEN_EXTENT; 2], 2).is_ok());
    }

    #[test]
    fn error_names_the_offending_axis() {
        let err = partition_screen(&[4, 0, 2], 1).unwrap_err();
        assert!(err.contains("size 1"), "{err}");
    }

    proptest! {
        #[test]
        fn partition_2d_is_complete_and_contiguous(
            w in 1..24_i32,
            h in 1..24_i32,
            paint_height in 1..8_i32,
        ) {
            let size = [w, h];
            let pixels = partition_screen(&size, paint_height).unwrap();
            check_complete(&size, &pixels);
            check_contiguous(&size, paint_height, &pixels);
        }

        #[test]
        fn partition_3d_is_complete_and_contiguous(
            a in 1..9_i32,
            b in 1..9_i32,
            c in 1..9_i32,
            paint_height in 1..5_i32,
        ) {
            let size = [a, b, c];
            let pixels = partition_screen(&size, paint_height).unwrap();
            check_complete(&size, &pixels);
            check_contiguous(&size, paint_height, &pixels);
        }

        #[test]
        fn partition_4d_is_complete(
            a in 1..5_i32,
            b in 1..5_i32,
            c in 1..5_i32,
            d in 1..5_i32,
            paint_height in 1..4_i32,
        ) {
            let size = [a, b, c, d];
            let pixels = partition_screen(&size, paint_height).unwrap();
            check_complete(&size, &pixels);
            check_contiguous(&size, paint_height, &pixels);
        }
    }
}
