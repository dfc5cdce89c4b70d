//! Gaussian blur for noise reduction before gradient computation.
//!
//! Convolves each pixel's zero-padded window against a normalized Gaussian
//! kernel from [`crate::kernel`]. Because out-of-bounds window positions
//! read as 0, pixels near the border blur toward darkness; only interior
//! pixels see the full kernel mass.

use crate::grid::PixelGrid;
use crate::kernel;
use crate::types::PipelineError;

/// Apply Gaussian blur to a grid, returning a fresh output grid of the same
/// dimensions.
///
/// The kernel is built (and validated) before any pixel work begins, so
/// invalid parameters fail fast.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidKernelSize`] when `size` is zero or even,
/// and [`PipelineError::InvalidSigma`] when `sigma` is not finite-positive.
pub fn gaussian_blur(grid: &PixelGrid, sigma: f32, size: u32) -> Result<PixelGrid, PipelineError> {
    let kernel = kernel::gaussian_kernel(sigma, size)?;

    let mut output = PixelGrid::new(grid.width(), grid.height());
    grid.for_each_pixel(size, |x, y, _, window| {
        let mut acc = 0.0f32;
        for i in 0..size {
            for j in 0..size {
                acc += window.get(i, j) * kernel.get(i, j);
            }
        }
        output.set(x, y, acc);
    });
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn output_dimensions_match_input() {
        let grid = PixelGrid::new(17, 31);
        let blurred = gaussian_blur(&grid, 1.4, 3).unwrap();
        assert_eq!(blurred.width(), 17);
        assert_eq!(blurred.height(), 31);
    }

    #[test]
    fn constant_grid_stays_constant_in_the_interior() {
        // Interior pixels see the full kernel, whose weights sum to
        // 1 +/- size^2 * 0.0005 after rounding.
        let c = 100.0;
        let grid = PixelGrid::filled(7, 7, c);
        let blurred = gaussian_blur(&grid, 1.4, 3).unwrap();
        let tolerance = c * 9.0 * 0.0005;
        for x in 1..6 {
            for y in 1..6 {
                let v = blurred.get(x, y);
                assert!(
                    (v - c).abs() <= tolerance,
                    "interior pixel ({x},{y}) drifted to {v}",
                );
            }
        }
    }

    #[test]
    fn border_pixels_sag_from_zero_padding() {
        let grid = PixelGrid::filled(7, 7, 100.0);
        let blurred = gaussian_blur(&grid, 1.4, 3).unwrap();
        // A corner window has only 4 in-bounds cells, so it loses most of
        // the kernel mass to padding.
        assert!(blurred.get(0, 0) < blurred.get(3, 3));
    }

    #[test]
    fn blur_spreads_an_isolated_bright_pixel() {
        let mut grid = PixelGrid::new(5, 5);
        grid.set(2, 2, 255.0);
        let blurred = gaussian_blur(&grid, 1.4, 3).unwrap();
        assert!(blurred.get(2, 2) < 255.0, "center should lose intensity");
        assert!(blurred.get(1, 2) > 0.0, "neighbor should gain intensity");
        assert!(
            blurred.get(0, 0).abs() < f32::EPSILON,
            "pixels outside the kernel reach stay dark",
        );
    }

    #[test]
    fn invalid_kernel_parameters_propagate() {
        let grid = PixelGrid::new(4, 4);
        assert!(matches!(
            gaussian_blur(&grid, 1.4, 2),
            Err(PipelineError::InvalidKernelSize(2)),
        ));
        assert!(matches!(
            gaussian_blur(&grid, -0.5, 3),
            Err(PipelineError::InvalidSigma(_)),
        ));
    }
}
