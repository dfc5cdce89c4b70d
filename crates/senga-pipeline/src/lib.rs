//! senga-pipeline: pure raster-to-polyline tracing (sans-IO).
//!
//! Converts a raw RGBA pixel buffer into a set of ordered, 8-connected
//! polylines suitable for line-drawing animation:
//! grayscale -> Gaussian blur -> Sobel gradient -> non-maximum suppression
//! -> hysteresis edge linking -> greedy contour tracing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory pixel
//! buffers and returns structured data. File decoding, canvas plumbing, and
//! rendering (e.g. SVG polylines with stroke animation) belong to the
//! caller.
//!
//! The only nondeterminism in the pipeline is the contour tracer's per-seed
//! direction shuffle: repeated runs may split a branching edge cluster into
//! different lines, but always cover the same pixels.

pub mod blur;
pub mod contour;
pub mod gradient;
pub mod grid;
pub mod hysteresis;
pub mod kernel;
pub mod suppress;
pub mod types;

pub use contour::{PointSet, trace_lines, trace_lines_with_rng};
pub use grid::PixelGrid;
pub use types::{Coord, DetectParams, Dimensions, Line, PipelineError, TraceResult};

/// Run edge detection on a grayscale grid.
///
/// Applies, in order: Gaussian blur, Sobel gradient magnitude, non-maximum
/// suppression, and hysteresis edge linking. Returns a binary grid where
/// 255 marks a connected edge and 0 everything else. Pure composition; no
/// additional state.
///
/// # Errors
///
/// All parameters are validated before any stage runs:
/// [`PipelineError::ThresholdInversion`] when the high threshold is below
/// the low one, [`PipelineError::InvalidKernelSize`] when the kernel size
/// is zero or even, and [`PipelineError::InvalidSigma`] when sigma is not
/// finite-positive.
pub fn detect_edges(grid: &PixelGrid, params: &DetectParams) -> Result<PixelGrid, PipelineError> {
    // Fail fast: reject bad thresholds before the convolution passes run.
    if params.high_threshold < params.low_threshold {
        return Err(PipelineError::ThresholdInversion {
            high: params.high_threshold,
            low: params.low_threshold,
        });
    }

    let blurred = blur::gaussian_blur(grid, params.sigma, params.kernel_size)?;
    let magnitude = gradient::sobel(&blurred);
    let suppressed = suppress::non_maximum_suppression(&magnitude);
    hysteresis::link_edges(&suppressed, params.high_threshold, params.low_threshold)
}

/// Run the full raster-to-polylines pipeline.
///
/// Takes a flat interleaved buffer (4 bytes per pixel, R,G,B,A order, pixels
/// row-major) and produces a [`TraceResult`] containing the traced lines and
/// the source dimensions. The dimensions are needed by downstream renderers
/// to set coordinate spaces (e.g., an SVG `viewBox`).
///
/// An image with no detectable edges yields an empty `lines` vec -- that is
/// a valid result, not an error.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidDimensions`] when `width` or `height` is
/// zero or `buffer.len()` is not `width * height * 4`, plus every error
/// [`detect_edges`] can produce.
pub fn process(
    buffer: &[u8],
    width: u32,
    height: u32,
    params: &DetectParams,
) -> Result<TraceResult, PipelineError> {
    let grid = PixelGrid::from_rgba_buffer(buffer, width, height)?;
    let edges = detect_edges(&grid, params)?;
    let points = PointSet::extract(&edges);
    let lines = contour::trace_lines(&points);
    Ok(TraceResult {
        lines,
        dimensions: Dimensions { width, height },
    })
}
