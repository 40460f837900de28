//! Filter operations
//!
//! This module provides the direct sliding-window convolution of grayscale images.
//!
//! The pipeline is: replicate-pad the image, accumulate the window sums with
//! [`filter2d`], then map the raw sums to 8-bit with [`crate::rescale::rescale_intensity`].
//!
//! # Example
//!
//! ```
//! use grayconv_image::{Image, ImageSize};
//! use grayconv_imgproc::filter::{convolve, kernels::Kernel2d};
//!
//! let image = Image::<u8, 1>::from_size_val(ImageSize { width: 5, height: 5 }, 100).unwrap();
//! let output = convolve(&image, &Kernel2d::sharpen()).unwrap();
//!
//! assert!(output.as_slice().iter().all(|&v| v == 100));
//! ```

use grayconv_image::{Image, ImageError};
use num_traits::AsPrimitive;
use thiserror::Error;

use crate::parallel::{ExecutionStrategy, ParallelError};
use crate::rescale::{self, InRange, RescaleError, RoundingMode};

/// Filter kernels
pub mod kernels;

mod convolution;
pub use convolution::filter2d;

use kernels::Kernel2d;

/// Errors that can occur while filtering an image.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel has an even dimension, so no center sample exists.
    #[error("kernel dimensions must be odd, got {0}x{1}")]
    InvalidKernelShape(usize, usize),

    /// The kernel weights are inconsistent with its shape or not finite.
    #[error("invalid kernel data: {0}")]
    InvalidKernelData(String),

    /// The image has no pixels.
    #[error("cannot filter an empty image of size {0}x{1}")]
    EmptyImage(usize, usize),

    /// Image creation or size error.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Parallel execution error.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// Intensity rescaling error.
    #[error(transparent)]
    Rescale(#[from] RescaleError),
}

/// Configuration of the convolution pipeline.
///
/// The default reads the raw sums in the range `[0, 255]`, truncates them to
/// 8-bit and runs on the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvolveConfig {
    /// How the sliding-window pass is executed.
    pub strategy: ExecutionStrategy,
    /// Range of raw sums mapped onto `[0, 255]`.
    pub in_range: InRange,
    /// Conversion of the rescaled value to an integer.
    pub rounding: RoundingMode,
}

impl ConvolveConfig {
    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the input range of the rescale step.
    pub fn with_in_range(mut self, in_range: InRange) -> Self {
        self.in_range = in_range;
        self
    }

    /// Set the rounding rule of the rescale step.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}

/// Convolve a grayscale image with a kernel using the default [`ConvolveConfig`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `kernel` - The kernel with odd width and height.
///
/// # Returns
///
/// A new 8-bit image with shape (H, W, 1).
///
/// # Errors
///
/// * [`FilterError::EmptyImage`] if `src` has no pixels.
pub fn convolve<T>(src: &Image<T, 1>, kernel: &Kernel2d) -> Result<Image<u8, 1>, FilterError>
where
    T: AsPrimitive<f64> + Default + Send + Sync,
{
    convolve_with(src, kernel, &ConvolveConfig::default())
}

/// Convolve a grayscale image with a kernel using an explicit configuration.
///
/// See [`convolve`] for the arguments and errors.
pub fn convolve_with<T>(
    src: &Image<T, 1>,
    kernel: &Kernel2d,
    config: &ConvolveConfig,
) -> Result<Image<u8, 1>, FilterError>
where
    T: AsPrimitive<f64> + Default + Send + Sync,
{
    let mut raw = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    filter2d(src, &mut raw, kernel, config.strategy)?;

    let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    rescale::rescale_intensity(&raw, &mut dst, config.in_range, config.rounding)?;

    Ok(dst)
}

/// A backend producing an 8-bit filtered image from an 8-bit image and a kernel.
///
/// The direct engine implements it as [`DirectConvolution`]; callers can provide
/// other implementations, e.g. a third-party routine, and compare them.
pub trait Filter2d {
    /// Short name of the backend, used in reports and file names.
    fn name(&self) -> &str;

    /// Filter `src` with `kernel`, returning an image of the same size.
    fn apply(&self, src: &Image<u8, 1>, kernel: &Kernel2d) -> Result<Image<u8, 1>, FilterError>;
}

/// The direct sliding-window convolution backend.
#[derive(Debug, Clone, Default)]
pub struct DirectConvolution {
    config: ConvolveConfig,
}

impl DirectConvolution {
    /// Create the backend with the given configuration.
    pub fn new(config: ConvolveConfig) -> Self {
        Self { config }
    }

    /// The configuration used by [`Filter2d::apply`].
    pub fn config(&self) -> &ConvolveConfig {
        &self.config
    }
}

impl Filter2d for DirectConvolution {
    fn name(&self) -> &str {
        "convolution"
    }

    fn apply(&self, src: &Image<u8, 1>, kernel: &Kernel2d) -> Result<Image<u8, 1>, FilterError> {
        convolve_with(src, kernel, &self.config)
    }
}
