use grayconv_image::{Image, ImageError};

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of elements.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the two images have different sizes.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::metrics::mse;
///
/// let image1 = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![0, 1, 2, 3]).unwrap();
/// let image2 = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![0, 3, 2, 3]).unwrap();
///
/// assert_eq!(mse(&image1, &image2).unwrap(), 1.0);
/// ```
pub fn mse<T, const C: usize>(image1: &Image<T, C>, image2: &Image<T, C>) -> Result<f32, ImageError>
where
    T: Copy + Into<f32>,
{
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.width(),
            image1.height(),
            image2.width(),
            image2.height(),
        ));
    }

    if image1.is_empty() {
        return Ok(0.0);
    }

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| {
            let (a, b): (f32, f32) = (a.into(), b.into());
            let d = a as f64 - b as f64;
            d * d
        })
        .sum::<f64>();

    Ok((sum / image1.numel() as f64) as f32)
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 20 \log_{10}(MAX) - 10 \log_{10}(MSE) $
///
/// where `MAX` is the maximum possible pixel value. Identical images give infinity.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `max_value` - The maximum possible pixel value, 255 for 8-bit images.
///
/// # Example
///
/// ```
/// use grayconv_image::{Image, ImageSize};
/// use grayconv_imgproc::metrics::psnr;
///
/// let image1 = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![0, 10]).unwrap();
/// let image2 = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![10, 0]).unwrap();
///
/// // MSE = 100, PSNR = 20 * log10(100) - 10 * log10(100) = 20 dB
/// assert!((psnr(&image1, &image2, 100.0).unwrap() - 20.0).abs() < 1e-4);
/// ```
pub fn psnr<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    max_value: f32,
) -> Result<f32, ImageError>
where
    T: Copy + Into<f32>,
{
    let mse = mse(image1, image2)?;

    if mse == 0f32 {
        return Ok(f32::INFINITY);
    }

    Ok(20f32 * max_value.log10() - 10f32 * mse.log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grayconv_image::ImageSize;

    #[test]
    fn test_equal() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;
        let image2 = image1.clone();
        assert_eq!(mse(&image1, &image2)?, 0.0);
        assert_eq!(psnr(&image1, &image2, 255.0)?, f32::INFINITY);
        Ok(())
    }

    #[test]
    fn test_not_equal() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 3],
        )?;
        let image2 = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![4, 1, 2, 3],
        )?;
        assert_eq!(mse(&image1, &image2)?, 4.0);
        // 20 * log10(255) - 10 * log10(4)
        assert_relative_eq!(psnr(&image1, &image2, 255.0)?, 42.11027, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), ImageError> {
        let image1 = Image::<f32, 1>::from_size_val([2, 2].into(), 0.0)?;
        let image2 = Image::<f32, 1>::from_size_val([2, 1].into(), 0.0)?;
        assert_eq!(
            mse(&image1, &image2),
            Err(ImageError::InvalidImageSize(2, 2, 2, 1))
        );
        Ok(())
    }
}
