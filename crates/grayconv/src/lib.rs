//! Direct sliding-window convolution of grayscale images.
//!
//! - [`image`]: the image container and its errors.
//! - [`imgproc`]: padding, kernels, convolution, intensity rescaling and metrics.
//!
//! ```
//! use grayconv::image::{Image, ImageSize};
//! use grayconv::imgproc::filter::{convolve, kernels::Kernel2d};
//!
//! let image = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 50).unwrap();
//! let blurred = convolve(&image, &Kernel2d::box_blur(3).unwrap()).unwrap();
//! assert_eq!(blurred.size(), image.size());
//! ```

#[doc(inline)]
pub use grayconv_image as image;

#[doc(inline)]
pub use grayconv_imgproc as imgproc;
