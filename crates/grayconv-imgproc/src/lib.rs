#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Sliding-window convolution and filter kernels.
pub mod filter;

/// Image similarity metrics.
pub mod metrics;

/// Border extension of images.
pub mod padding;

/// Row-wise execution strategies.
pub mod parallel;

/// Mapping of raw filter responses to 8-bit.
pub mod rescale;
