//! Intensity rescaling of raw filter responses to 8-bit images.
//!
//! A filter response can fall anywhere on the real line: negative for edge
//! kernels, above 255 for sharpening. [`rescale_intensity`] maps it back to a
//! displayable 8-bit image in two explicit steps:
//!
//! 1. clamp every value to the input range `[lo, hi]` and map it linearly onto `[0, 255]`;
//! 2. convert to `u8` with a [`RoundingMode`].
//!
//! With the default input range `[0, 255]` the mapping is the identity, so values
//! already in range pass through and only the out-of-range ones are clamped.

use grayconv_image::{Image, ImageError};
use thiserror::Error;

/// Errors that can occur while rescaling intensities.
#[derive(Error, Debug, PartialEq)]
pub enum RescaleError {
    /// The fixed input range is empty or not finite.
    #[error("invalid input range [{0}, {1}]")]
    InvalidRange(f32, f32),

    /// Image size error.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// The range of input values mapped onto `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InRange {
    /// A fixed `(lo, hi)` range; values outside are clamped.
    Fixed(f32, f32),
    /// The minimum and maximum of the image itself.
    Image,
}

impl Default for InRange {
    fn default() -> Self {
        InRange::Fixed(0.0, 255.0)
    }
}

/// How a rescaled value in `[0, 255]` becomes an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Drop the fractional part, e.g. `12.9 -> 12`.
    #[default]
    Truncate,
    /// Round to the nearest integer, halves away from zero, e.g. `12.5 -> 13`.
    Nearest,
}

impl RoundingMode {
    /// Convert a value to `u8`, saturating at the bounds. NaN becomes 0.
    #[inline]
    pub fn to_u8(self, value: f64) -> u8 {
        let value = match self {
            RoundingMode::Truncate => value.trunc(),
            RoundingMode::Nearest => value.round(),
        };
        value as u8
    }
}

/// Find the minimum and maximum values in an image.
///
/// Returns `None` for an empty image. NaN values are ignored.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::rescale::find_min_max;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![3.0, -1.5, 8.0, 0.0],
/// )
/// .unwrap();
///
/// assert_eq!(find_min_max(&image), Some((-1.5, 8.0)));
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Option<(T, T)>
where
    T: Copy + PartialOrd,
{
    image
        .as_slice()
        .iter()
        .filter(|&&v| v.partial_cmp(&v).is_some())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((
                if v < min { v } else { min },
                if v > max { v } else { max },
            )),
        })
}

/// Rescale raw intensities to an 8-bit image.
///
/// Every value is clamped to the input range `[lo, hi]`, mapped linearly so that
/// `lo` becomes 0 and `hi` becomes 255, and converted with `rounding`.
///
/// With [`InRange::Image`] the range is the minimum and maximum of `src`; a flat
/// image has an empty range and is mapped to 0.
///
/// # Arguments
///
/// * `src` - The raw image with shape (H, W, C).
/// * `dst` - The output image with shape (H, W, C).
/// * `in_range` - The range of `src` values mapped onto `[0, 255]`.
/// * `rounding` - The conversion to integers.
///
/// # Errors
///
/// * [`RescaleError::Image`] if `src` and `dst` have different sizes.
/// * [`RescaleError::InvalidRange`] if a fixed range has `lo >= hi` or is not finite.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::rescale::{rescale_intensity, InRange, RoundingMode};
///
/// let raw = Image::<f32, 1>::new(
///     ImageSize { width: 4, height: 1 },
///     vec![-40.0, 100.0, 100.7, 400.0],
/// )
/// .unwrap();
/// let mut out = Image::<u8, 1>::from_size_val(raw.size(), 0).unwrap();
///
/// rescale_intensity(&raw, &mut out, InRange::default(), RoundingMode::Truncate).unwrap();
///
/// assert_eq!(out.as_slice(), &[0, 100, 100, 255]);
/// ```
pub fn rescale_intensity<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<u8, C>,
    in_range: InRange,
    rounding: RoundingMode,
) -> Result<(), RescaleError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    let (lo, hi) = match in_range {
        InRange::Fixed(lo, hi) => {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(RescaleError::InvalidRange(lo, hi));
            }
            (lo as f64, hi as f64)
        }
        InRange::Image => match find_min_max(src) {
            Some((lo, hi)) if lo < hi => (lo as f64, hi as f64),
            _ => {
                dst.as_slice_mut().fill(0);
                return Ok(());
            }
        },
    };

    let scale = 255.0 / (hi - lo);

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &v)| {
            let v = (v as f64).clamp(lo, hi);
            *out = rounding.to_u8((v - lo) * scale);
        });

    Ok(())
}
