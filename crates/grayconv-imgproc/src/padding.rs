use grayconv_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Border widths in pixels on each side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Rows added above.
    pub top: usize,
    /// Rows added below.
    pub bottom: usize,
    /// Columns added on the left.
    pub left: usize,
    /// Columns added on the right.
    pub right: usize,
}

impl Padding2D {
    /// Padding of `x` columns on the left and right and `y` rows on the top and bottom.
    pub fn symmetric(x: usize, y: usize) -> Self {
        Self {
            top: y,
            bottom: y,
            left: x,
            right: x,
        }
    }

    /// The size of an image of `size` after applying this padding.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grayconv_image::ImageSize;
    /// use grayconv_imgproc::padding::Padding2D;
    ///
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let size = padding.padded_size(ImageSize { width: 4, height: 4 });
    ///
    /// assert_eq!(size, ImageSize { width: 8, height: 6 });
    /// ```
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

// index of the nearest sample in [0, len) for a padded coordinate
#[inline]
fn replicate_index(i: usize, pad: usize, len: usize) -> usize {
    i.saturating_sub(pad).min(len - 1)
}

/// Writes `src` into the center of `dst` and fills the border by replicating
/// the edge samples of `src`.
///
/// The edge sample is repeated outward on every side, e.g. a row `a b c d`
/// padded by 3 on the left reads `a a a | a b c d`. Corners take the corner sample.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The padded image, of the size of `src` plus `padding`.
/// * `padding` - The border width on each side.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the size of `dst` is not the size of `src`
/// plus `padding`, or if `src` is empty and there is no sample to replicate.
///
/// # Example
///
/// ```rust
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 3 }, 0).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::symmetric(1, 1)).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 1, 2, 2, 1, 1, 2, 2, 1, 1, 2, 2]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if src.is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            1,
            1,
        ));
    }

    let row_stride = dst.width() * C;
    let src_width = src.width();
    let src_height = src.height();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let sy = replicate_index(y, padding.top, src_height);
            let src_row = &src_data[sy * src_width * C..(sy + 1) * src_width * C];
            for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let sx = replicate_index(x, padding.left, src_width);
                dst_pixel.copy_from_slice(&src_row[sx * C..(sx + 1) * C]);
            }
        });

    Ok(())
}

/// Allocates a new image holding `src` extended by `padding` with replicated borders.
///
/// Every padded sample equals the nearest border sample of `src`.
pub fn pad_replicate<T, const C: usize>(
    src: &Image<T, C>,
    padding: Padding2D,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::from_size_val(padding.padded_size(src.size()), T::default())?;
    spatial_padding(src, &mut dst, padding)?;
    Ok(dst)
}
