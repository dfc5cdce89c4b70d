//! Hysteresis edge linking: dual-threshold classification plus promotion of
//! candidate pixels connected to strong edges.
//!
//! Classification against a high threshold `ht` and low threshold `lt`:
//! `strong(v) = v > ht`, `candidate(v) = lt <= v <= ht`, `weak(v) = v < lt`.
//! Strong pixels become edges outright; candidates become edges only when an
//! 8-connected chain of candidates links them to a strong pixel strictly
//! inside the border.
//!
//! Linking uses an explicit worklist instead of recursion, so memory is
//! bounded by the number of distinct promoted pixels rather than call-stack
//! depth on long candidate chains.

use crate::grid::PixelGrid;
use crate::types::PipelineError;

/// Edge-pixel intensity in the output grid.
pub const EDGE: f32 = 255.0;

/// Classify and link edges, returning a binary grid (values 0 or 255) of
/// the same dimensions.
///
/// Candidate classification during linking reads the *input* grid, while
/// promotion marks the output grid; an already-promoted pixel is never
/// requeued, which both terminates cycles and bounds the worklist.
/// Linking never starts from the outermost pixel ring, and promoted border
/// pixels do not propagate further, but a strong pixel anywhere -- border
/// included -- is always an edge in the output.
///
/// # Errors
///
/// Returns [`PipelineError::ThresholdInversion`] when `high < low`.
#[allow(clippy::float_cmp)] // the working grid only ever holds 0.0 or 255.0
pub fn link_edges(grid: &PixelGrid, high: f32, low: f32) -> Result<PixelGrid, PipelineError> {
    if high < low {
        return Err(PipelineError::ThresholdInversion { high, low });
    }

    let strong = |v: f32| v > high;
    let candidate = |v: f32| v >= low && v <= high;

    let (width, height) = (grid.width(), grid.height());
    let mut work = PixelGrid::new(width, height);

    // Pass 1: strong pixels become edges, everything else starts at 0.
    grid.for_each_pixel(1, |x, y, value, _| {
        work.set(x, y, if strong(value) { EDGE } else { 0.0 });
    });

    // Pass 2: flood candidate chains outward from interior strong pixels.
    let interior = |x: u32, y: u32| x > 0 && y > 0 && x < width - 1 && y < height - 1;
    let mut pending: Vec<(u32, u32)> = Vec::new();
    if width > 2 && height > 2 {
        for x in 0..width {
            for y in 0..height {
                if interior(x, y) && work.get(x, y) == EDGE {
                    pending.push((x, y));
                    while let Some((px, py)) = pending.pop() {
                        if !interior(px, py) {
                            continue;
                        }
                        for nx in px - 1..=px + 1 {
                            for ny in py - 1..=py + 1 {
                                if candidate(grid.get(nx, ny)) && work.get(nx, ny) != EDGE {
                                    work.set(nx, ny, EDGE);
                                    pending.push((nx, ny));
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // Pass 3: collapse anything that is not an edge to 0.
    for x in 0..width {
        for y in 0..height {
            if work.get(x, y) != EDGE {
                work.set(x, y, 0.0);
            }
        }
    }
    Ok(work)
}
