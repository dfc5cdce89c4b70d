//! Sobel gradient magnitude.
//!
//! Convolves two fixed 3x3 kernels against each pixel's zero-padded window
//! and writes the combined magnitude `sqrt(gh^2 + gv^2)`. The output is
//! deliberately unclamped -- magnitudes well above 255 are normal at strong
//! boundaries and the hysteresis thresholds are calibrated against them.

use crate::grid::PixelGrid;

/// Responds to vertical edges (horizontal intensity change).
const VERTICAL_EDGE: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Responds to horizontal edges (vertical intensity change).
const HORIZONTAL_EDGE: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Compute the Sobel gradient magnitude of every pixel, returning a fresh
/// grid of the same dimensions.
#[must_use = "returns the gradient magnitude grid"]
pub fn sobel(grid: &PixelGrid) -> PixelGrid {
    let mut output = PixelGrid::new(grid.width(), grid.height());
    grid.for_each_pixel(3, |x, y, _, window| {
        let mut gh = 0.0f32;
        let mut gv = 0.0f32;
        for i in 0..3u32 {
            for j in 0..3u32 {
                let v = window.get(i, j);
                gh += VERTICAL_EDGE[i as usize][j as usize] * v;
                gv += HORIZONTAL_EDGE[i as usize][j as usize] * v;
            }
        }
        output.set(x, y, gh.hypot(gv));
    });
    output
}
