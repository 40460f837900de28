//! Image similarity metrics.
//!
//! Used to quantify how close two filtered images are, e.g. the output of the
//! direct convolution and the output of a reference implementation.
//!
//! # Available Metrics
//!
//! - **MSE** (Mean Squared Error): Average squared difference between pixels
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale
//! - **Mean absolute difference**: Average absolute difference between pixels
//! - **Max absolute difference**: Largest absolute difference between pixels

mod diff;
mod mse;

pub use diff::{max_abs_diff, mean_abs_diff};
pub use mse::{mse, psnr};
