//! Shared types for the senga tracing pipeline.

use serde::{Deserialize, Serialize};

/// An integer pixel coordinate in image space.
///
/// Valid coordinates always lie within `[0, width) x [0, height)` of the
/// grid they were taken from. Implements `Eq + Hash` so it can key sets
/// directly, with no stringification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal position (pixels from the left edge).
    pub x: u32,
    /// Vertical position (pixels from the top edge).
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Returns `true` if `other` is one of this coordinate's 8-connected
    /// neighbors (or the coordinate itself): both axes differ by at most 1.
    #[must_use]
    pub const fn is_adjacent_8(self, other: Self) -> bool {
        self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

/// An ordered sequence of traced edge pixels.
///
/// Consecutive coordinates are always 8-adjacent. A line contains at least
/// one coordinate; isolated edge pixels produce single-point lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line(Vec<Coord>);

impl Line {
    /// Create a new line from a vector of coordinates.
    #[must_use]
    pub const fn new(coords: Vec<Coord>) -> Self {
        Self(coords)
    }

    /// Returns `true` if the line has no coordinates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of coordinates in the line.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first coordinate, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Coord> {
        self.0.first()
    }

    /// Returns the last coordinate, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Coord> {
        self.0.last()
    }

    /// Returns a slice of all coordinates.
    #[must_use]
    pub fn points(&self) -> &[Coord] {
        &self.0
    }

    /// Consumes the line and returns the underlying vector of coordinates.
    #[must_use]
    pub fn into_points(self) -> Vec<Coord> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Tuning parameters for edge detection.
///
/// # Threshold invariants
///
/// `high_threshold` must be at least `low_threshold`; the detector rejects
/// inverted thresholds with [`PipelineError::ThresholdInversion`] before any
/// stage runs. `sigma` must be positive and `kernel_size` a positive odd
/// integer, enforced by kernel construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectParams {
    /// Hysteresis high threshold. Pixels with gradient magnitude above this
    /// value are definite edges.
    pub high_threshold: f32,

    /// Hysteresis low threshold. Pixels with gradient magnitude between the
    /// two thresholds are edges only when connected to a definite edge.
    pub low_threshold: f32,

    /// Gaussian blur sigma. Higher values produce more smoothing before
    /// gradient computation.
    pub sigma: f32,

    /// Gaussian kernel side length. Must be a positive odd integer.
    pub kernel_size: u32,
}

impl DetectParams {
    /// Preset tuned for line-drawing animation: low thresholds keep faint
    /// strokes so traced drawings stay visually dense.
    #[must_use]
    pub const fn line_art() -> Self {
        Self {
            high_threshold: 80.0,
            low_threshold: 10.0,
            sigma: 1.4,
            kernel_size: 3,
        }
    }
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            high_threshold: 100.0,
            low_threshold: 50.0,
            sigma: 1.4,
            kernel_size: 3,
        }
    }
}

/// Result of running the full raster-to-polylines pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Traced lines, ordered by first-seen seed point. Empty when the image
    /// contains no edges.
    pub lines: Vec<Line>,

    /// Dimensions of the source image in pixels.
    ///
    /// Downstream renderers use this to set coordinate spaces
    /// (e.g., an SVG `viewBox`).
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// All validation failures surface synchronously before any stage runs on
/// bad input; there is no partial-failure mode.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Kernel or neighborhood size is not a positive odd integer.
    #[error("kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(u32),

    /// Gaussian sigma is zero, negative, or not finite.
    #[error("gaussian sigma must be positive and finite, got {0}")]
    InvalidSigma(f32),

    /// Width or height is zero, or a buffer's length does not match the
    /// declared dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The high threshold is below the low threshold, which makes the
    /// hysteresis classification predicates inconsistent.
    #[error("high threshold {high} is below low threshold {low}")]
    ThresholdInversion {
        /// The rejected high threshold.
        high: f32,
        /// The rejected low threshold.
        low: f32,
    },
}
