//! Grayscale pixel grid: the raster representation every pipeline stage
//! consumes and produces.
//!
//! A [`PixelGrid`] owns a `width x height` grid of `f32` intensities
//! addressed by `(x, y)`. Values are conceptually in `[0, 255]` but the grid
//! itself never clamps; the Sobel stage transiently exceeds 255 by design.
//! Stages never mutate their input -- each one fills a fresh output grid, so
//! no two stages ever share mutable state.
//!
//! Out-of-bounds reads through [`PixelGrid::neighborhood`] are zero-padded,
//! including windows centered on (or beyond) the border.

use image::GrayImage;

use crate::types::PipelineError;

/// Luma weights for RGB-to-grayscale conversion.
const LUMA_R: f32 = 0.298;
const LUMA_G: f32 = 0.586;
const LUMA_B: f32 = 0.114;

/// A `width x height` grid of grayscale intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    /// Row-major storage: index `y * width + x`.
    data: Vec<f32>,
}

impl PixelGrid {
    /// Create a zero-filled grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Create a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Decode a flat interleaved color buffer into a grayscale grid.
    ///
    /// Every 4 consecutive bytes encode one pixel's R, G, B, A channels in
    /// that order; pixels are scanned row-major (x fastest). Each pixel's
    /// intensity is the luma `0.298*R + 0.586*G + 0.114*B`, rounded to the
    /// nearest integer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidDimensions`] when `width` or `height`
    /// is zero, or when `buffer.len()` is not `width * height * 4`.
    pub fn from_rgba_buffer(
        buffer: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(format!(
                "width and height must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(PipelineError::InvalidDimensions(format!(
                "buffer length {} does not match {width}x{height}x4 = {expected}",
                buffer.len()
            )));
        }

        let data = buffer
            .chunks_exact(4)
            .map(|px| {
                let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
                (LUMA_R * r + LUMA_G * g + LUMA_B * b).round()
            })
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a `GrayImage` into a grid, one intensity per pixel.
    #[must_use]
    pub fn from_gray_image(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.as_raw().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Set the intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// The zero-padded `size x size` window centered on `(x, y)`.
    ///
    /// `size` must be odd; the filters validate it before any window is
    /// taken. Positions mapping outside the grid read as 0, including when
    /// the center itself sits on or beyond a border.
    #[must_use]
    pub fn neighborhood(&self, x: u32, y: u32, size: u32) -> Neighborhood {
        let mut window = Neighborhood::zeroed(size);
        window.fill_from(self, x, y);
        window
    }

    /// Visit every cell with its value and zero-padded `size x size` window.
    ///
    /// Iterates x outer, y inner, both ascending from 0. The grid itself is
    /// not mutated; callbacks write into their own output grid. The window
    /// is a reused scratch buffer, refilled per pixel.
    pub fn for_each_pixel<F>(&self, size: u32, mut f: F)
    where
        F: FnMut(u32, u32, f32, &Neighborhood),
    {
        let mut window = Neighborhood::zeroed(size);
        for x in 0..self.width {
            for y in 0..self.height {
                window.fill_from(self, x, y);
                f(x, y, self.get(x, y), &window);
            }
        }
    }

    /// Produce a flat interleaved color buffer in the same 4-channel layout
    /// as [`from_rgba_buffer`](Self::from_rgba_buffer) input.
    ///
    /// The grayscale value is clamped to `[0, 255]`, rounded, and replicated
    /// into R, G, B with a constant 255 alpha. Iterates y outer, x inner --
    /// the row-major layout display surfaces expect, which differs from the
    /// x-outer order of [`for_each_pixel`](Self::for_each_pixel).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba_buffer(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.data.len() * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let v = self.get(x, y).clamp(0.0, 255.0).round() as u8;
                buffer.extend_from_slice(&[v, v, v, 255]);
            }
        }
        buffer
    }

    /// Convert the grid into a `GrayImage`, clamping each intensity to the
    /// `u8` range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            image::Luma([self.get(x, y).clamp(0.0, 255.0).round() as u8])
        })
    }
}

/// A zero-padded square window of grid intensities.
///
/// `get(i, j)` addresses the window with `i` indexing the x offset and `j`
/// the y offset, both in `[0, size)`; the center cell is
/// `get((size-1)/2, (size-1)/2)`.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    size: u32,
    /// Column-major within the window: index `i * size + j`.
    values: Vec<f32>,
}

impl Neighborhood {
    fn zeroed(size: u32) -> Self {
        Self {
            size,
            values: vec![0.0; size as usize * size as usize],
        }
    }

    /// Refill from the window centered on `(x, y)`, zero-padding positions
    /// that map outside the grid.
    fn fill_from(&mut self, grid: &PixelGrid, x: u32, y: u32) {
        let half = i64::from(self.size / 2);
        for i in 0..self.size {
            for j in 0..self.size {
                let tx = i64::from(x) - half + i64::from(i);
                let ty = i64::from(y) - half + i64::from(j);
                let in_bounds = tx >= 0
                    && ty >= 0
                    && tx < i64::from(grid.width)
                    && ty < i64::from(grid.height);
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let value = if in_bounds {
                    grid.get(tx as u32, ty as u32)
                } else {
                    0.0
                };
                self.values[(i * self.size + j) as usize] = value;
            }
        }
    }

    /// Window side length.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Value at window position `(i, j)`: `i` indexes the x offset, `j` the
    /// y offset.
    ///
    /// # Panics
    ///
    /// Panics when `i` or `j` is not below the window size.
    #[must_use]
    pub fn get(&self, i: u32, j: u32) -> f32 {
        self.values[(i * self.size + j) as usize]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_zero_filled() {
        let grid = PixelGrid::new(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(grid.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn filled_grid_holds_value() {
        let grid = PixelGrid::filled(2, 2, 42.0);
        assert_eq!(grid.get(1, 1), 42.0);
    }

    #[test]
    fn empty_grid_iterates_nothing() {
        let grid = PixelGrid::new(0, 0);
        let mut visits = 0;
        grid.for_each_pixel(3, |_, _, _, _| visits += 1);
        assert_eq!(visits, 0);
        assert!(grid.to_rgba_buffer().is_empty());
    }

    #[test]
    fn from_rgba_buffer_computes_luma() {
        // One red, one green, one blue pixel on a single row.
        let buffer = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255,
        ];
        let grid = PixelGrid::from_rgba_buffer(&buffer, 3, 1).unwrap();
        assert_eq!(grid.get(0, 0), (0.298f32 * 255.0).round()); // 76
        assert_eq!(grid.get(1, 0), (0.586f32 * 255.0).round()); // 149
        assert_eq!(grid.get(2, 0), (0.114f32 * 255.0).round()); // 29
    }

    #[test]
    fn from_rgba_buffer_scans_row_major() {
        // 2x2 with distinct gray levels; pixel order in the buffer is
        // (0,0), (1,0), (0,1), (1,1).
        let grays = [10u8, 20, 30, 40];
        let mut buffer = Vec::new();
        for g in grays {
            buffer.extend_from_slice(&[g, g, g, 255]);
        }
        let grid = PixelGrid::from_rgba_buffer(&buffer, 2, 2).unwrap();
        assert_eq!(grid.get(0, 0), 10.0);
        assert_eq!(grid.get(1, 0), 20.0);
        assert_eq!(grid.get(0, 1), 30.0);
        assert_eq!(grid.get(1, 1), 40.0);
    }

    #[test]
    fn from_rgba_buffer_rejects_zero_dimensions() {
        let result = PixelGrid::from_rgba_buffer(&[], 0, 5);
        assert!(matches!(result, Err(PipelineError::InvalidDimensions(_))));
    }

    #[test]
    fn from_rgba_buffer_rejects_length_mismatch() {
        let buffer = vec![0u8; 4 * 3]; // 3 pixels
        let result = PixelGrid::from_rgba_buffer(&buffer, 2, 2);
        assert!(matches!(result, Err(PipelineError::InvalidDimensions(_))));
    }

    #[test]
    fn neighborhood_at_corner_is_zero_padded() {
        let mut grid = PixelGrid::new(4, 4);
        grid.set(0, 0, 7.0);
        grid.set(1, 0, 8.0);
        grid.set(0, 1, 9.0);

        let n = grid.neighborhood(0, 0, 3);
        // Center maps to (0, 0).
        assert_eq!(n.get(1, 1), 7.0);
        // In-bounds neighbors.
        assert_eq!(n.get(2, 1), 8.0);
        assert_eq!(n.get(1, 2), 9.0);
        // Everything mapping outside the grid reads 0.
        assert_eq!(n.get(0, 0), 0.0);
        assert_eq!(n.get(0, 1), 0.0);
        assert_eq!(n.get(0, 2), 0.0);
        assert_eq!(n.get(1, 0), 0.0);
        assert_eq!(n.get(2, 0), 0.0);
    }

    #[test]
    fn neighborhood_centered_beyond_boundary_is_all_zero() {
        // A window whose center lies past the grid edge reads pure padding.
        let grid = PixelGrid::filled(2, 2, 5.0);
        let n = grid.neighborhood(4, 4, 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(n.get(i, j), 0.0);
            }
        }
    }

    #[test]
    fn for_each_pixel_visits_x_outer_y_inner() {
        let grid = PixelGrid::new(2, 3);
        let mut order = Vec::new();
        grid.for_each_pixel(1, |x, y, _, _| order.push((x, y)));
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)],
        );
    }

    #[test]
    fn for_each_pixel_passes_matching_window() {
        let mut grid = PixelGrid::new(3, 3);
        grid.set(1, 1, 50.0);
        grid.for_each_pixel(3, |x, y, value, n| {
            assert_eq!(value, grid.get(x, y));
            assert_eq!(n.get(1, 1), value);
        });
    }

    #[test]
    fn clone_is_independent() {
        let mut grid = PixelGrid::filled(2, 2, 1.0);
        let copy = grid.clone();
        grid.set(0, 0, 99.0);
        assert_eq!(copy.get(0, 0), 1.0);
        assert_eq!(grid.get(0, 0), 99.0);
    }

    #[test]
    fn fill_overwrites_every_cell() {
        let mut grid = PixelGrid::filled(2, 2, 3.0);
        grid.fill(8.0);
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(grid.get(x, y), 8.0);
            }
        }
    }

    #[test]
    fn to_rgba_buffer_is_row_major_with_opaque_alpha() {
        let mut grid = PixelGrid::new(2, 2);
        grid.set(0, 0, 10.0);
        grid.set(1, 0, 20.0);
        grid.set(0, 1, 30.0);
        grid.set(1, 1, 40.0);
        assert_eq!(
            grid.to_rgba_buffer(),
            vec![
                10, 10, 10, 255, //
                20, 20, 20, 255, //
                30, 30, 30, 255, //
                40, 40, 40, 255,
            ],
        );
    }

    #[test]
    fn to_rgba_buffer_clamps_out_of_range_values() {
        let mut grid = PixelGrid::new(2, 1);
        grid.set(0, 0, 300.0); // Sobel output can exceed 255
        grid.set(1, 0, -5.0);
        let buffer = grid.to_rgba_buffer();
        assert_eq!(&buffer[0..4], &[255, 255, 255, 255]);
        assert_eq!(&buffer[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn gray_image_round_trip() {
        let image = GrayImage::from_fn(3, 2, |x, y| image::Luma([(x + y * 3) as u8 * 10]));
        let grid = PixelGrid::from_gray_image(&image);
        assert_eq!(grid.get(2, 1), 50.0);
        assert_eq!(grid.to_gray_image(), image);
    }
}
