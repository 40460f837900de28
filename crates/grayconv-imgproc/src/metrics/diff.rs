use grayconv_image::{Image, ImageError};

fn check_same_size<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<(), ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.width(),
            image1.height(),
            image2.width(),
            image2.height(),
        ));
    }
    Ok(())
}

#[inline]
fn abs_diff<T: Into<f32>>(a: T, b: T) -> f32 {
    let (a, b): (f32, f32) = (a.into(), b.into());
    (a - b).abs()
}

/// Compute the mean absolute difference between two images.
///
/// $ MAD(a, b) = \frac{1}{N} \sum_{i=1}^{N} |a_i - b_i| $
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the two images have different sizes.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::metrics::mean_abs_diff;
///
/// let image1 = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 5, 10]).unwrap();
/// let image2 = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![3, 5, 7]).unwrap();
///
/// assert_eq!(mean_abs_diff(&image1, &image2).unwrap(), 2.0);
/// ```
pub fn mean_abs_diff<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f32, ImageError>
where
    T: Copy + Into<f32>,
{
    check_same_size(image1, image2)?;

    if image1.is_empty() {
        return Ok(0.0);
    }

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .fold(0f64, |acc, (&a, &b)| acc + abs_diff(a, b) as f64);

    Ok((sum / image1.numel() as f64) as f32)
}

/// Compute the largest absolute difference between two images.
///
/// Returns 0 for empty images.
pub fn max_abs_diff<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f32, ImageError>
where
    T: Copy + Into<f32>,
{
    check_same_size(image1, image2)?;

    Ok(image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| abs_diff(a, b))
        .fold(0f32, f32::max))
}
