//! Gaussian convolution kernel generation.
//!
//! Produces the normalized square weight matrix the blur stage convolves
//! against each pixel window. Weights are normalized to sum to 1 and then
//! rounded to 3 decimal places, so the actual sum drifts by up to
//! `size^2 * 0.0005` -- downstream consumers (and tests) must tolerate that.

use std::f64::consts::PI;

use crate::types::PipelineError;

/// A normalized square matrix of Gaussian weights with odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: u32,
    /// Index `i * size + j`, matching window addressing.
    weights: Vec<f32>,
}

impl Kernel {
    /// Side length of the kernel.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Weight at kernel position `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics when `i` or `j` is not below the kernel size.
    #[must_use]
    pub fn get(&self, i: u32, j: u32) -> f32 {
        self.weights[(i * self.size + j) as usize]
    }
}

/// Validate that `size` is usable as a kernel or window side length.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidKernelSize`] when `size` is zero or even.
pub const fn validate_size(size: u32) -> Result<(), PipelineError> {
    if size == 0 || size % 2 == 0 {
        return Err(PipelineError::InvalidKernelSize(size));
    }
    Ok(())
}

/// Generate a normalized Gaussian kernel for the given `sigma` and odd
/// `size`.
///
/// Each cell `(i, j)` takes the 2D Gaussian density at its offset from the
/// kernel center, `g(x, y) = 1/(2*pi*sigma^2) * exp(-(x^2+y^2)/(2*sigma^2))`.
/// All cells are then divided by their sum and rounded to 3 decimal places.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidKernelSize`] when `size` is zero or even,
/// and [`PipelineError::InvalidSigma`] when `sigma` is not finite-positive.
pub fn gaussian_kernel(sigma: f32, size: u32) -> Result<Kernel, PipelineError> {
    validate_size(size)?;
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(PipelineError::InvalidSigma(sigma));
    }

    let s = f64::from(sigma);
    let half = f64::from((size - 1) / 2);
    let mut raw = vec![0.0f64; size as usize * size as usize];
    let mut sum = 0.0f64;

    for i in 0..size {
        let x = f64::from(i) - half;
        for j in 0..size {
            let y = f64::from(j) - half;
            let gaussian = (1.0 / (2.0 * PI * s * s)) * (-(x * x + y * y) / (2.0 * s * s)).exp();
            raw[(i * size + j) as usize] = gaussian;
            sum += gaussian;
        }
    }

    // Normalize, then round each weight to 3 decimals.
    #[allow(clippy::cast_possible_truncation)]
    let weights = raw
        .into_iter()
        .map(|w| ((w / sum) * 1000.0).round() as f32 / 1000.0)
        .collect();

    Ok(Kernel { size, weights })
}
