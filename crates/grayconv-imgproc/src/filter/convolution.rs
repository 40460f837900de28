use grayconv_image::{Image, ImageError};
use num_traits::AsPrimitive;

use super::{kernels::Kernel2d, FilterError};
use crate::padding::{self, Padding2D};
use crate::parallel::{self, ExecutionStrategy};

/// Compute the raw sliding-window sums of an image with a kernel.
///
/// The image is extended by replicating its border samples so that every output
/// pixel has a full neighborhood; the output at `(x, y)` is the sum of the
/// element-wise product of the kernel with the window centered at `(x, y)`.
/// The kernel is not flipped, i.e. this is a correlation. Sums are accumulated
/// in `f64` and stored without any clamping.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `kernel` - The kernel; [`Kernel2d`] guarantees odd width and height.
/// * `strategy` - How the rows of `dst` are computed.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Errors
///
/// * [`FilterError::EmptyImage`] if `src` has no pixels.
/// * [`FilterError::Image`] if `dst` does not have the size of `src`.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::filter::{filter2d, kernels::Kernel2d};
/// use grayconv_imgproc::parallel::ExecutionStrategy;
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![10, 20, 30]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
/// let kernel = Kernel2d::new(3, 1, vec![-1.0, 0.0, 1.0]).unwrap();
///
/// filter2d(&src, &mut dst, &kernel, ExecutionStrategy::Serial).unwrap();
///
/// assert_eq!(dst.as_slice(), &[10.0, 20.0, 10.0]);
/// ```
pub fn filter2d<T>(
    src: &Image<T, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    T: AsPrimitive<f64> + Default + Send + Sync,
{
    if src.is_empty() {
        return Err(FilterError::EmptyImage(src.width(), src.height()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    let (kw, kh) = (kernel.width(), kernel.height());
    let (pad_x, pad_y) = kernel.padding();
    log::debug!(
        "filter2d: image {}, kernel {kw}x{kh}, padding ({pad_x}, {pad_y}), {strategy:?}",
        src.size()
    );

    let padded = padding::pad_replicate(src, Padding2D::symmetric(pad_x, pad_y))?;
    let padded_cols = padded.width();
    let padded_data = padded.as_slice();
    let weights = kernel.as_slice();

    parallel::for_each_row(dst.as_slice_mut(), src.cols(), strategy, |y, dst_row| {
        for (x, out) in dst_row.iter_mut().enumerate() {
            // the window centered at (x, y) starts at (x, y) in the padded image
            let mut sum = 0f64;
            for (ky, kernel_row) in weights.chunks_exact(kw).enumerate() {
                let start = (y + ky) * padded_cols + x;
                let window_row = &padded_data[start..start + kw];
                sum += window_row
                    .iter()
                    .zip(kernel_row.iter())
                    .map(|(&p, &w)| p.as_() * w)
                    .sum::<f64>();
            }
            *out = sum as f32;
        }
    })?;

    Ok(())
}
