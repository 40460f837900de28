use grayconv::image::{Image, ImageError};
use grayconv::imgproc::filter::{kernels::Kernel2d, Filter2d, FilterError};
use image::GrayImage;

/// Filtering backed by `imageproc::filter::filter_clamped`.
///
/// Borders are clamped to the nearest edge pixel, sums are accumulated in `f32`
/// and clamped to `[0, 255]`, so the output is close to but not always equal to
/// the direct convolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceConvolution;

impl Filter2d for ReferenceConvolution {
    fn name(&self) -> &str {
        "reference"
    }

    fn apply(&self, src: &Image<u8, 1>, kernel: &Kernel2d) -> Result<Image<u8, 1>, FilterError> {
        if src.is_empty() {
            return Err(FilterError::EmptyImage(src.width(), src.height()));
        }

        let gray = to_gray_image(src)?;
        let weights = kernel
            .as_slice()
            .iter()
            .map(|&w| w as f32)
            .collect::<Vec<_>>();
        let kernel =
            imageproc::kernel::Kernel::new(&weights, kernel.width() as u32, kernel.height() as u32);

        let filtered: GrayImage = imageproc::filter::filter_clamped::<_, f32, u8>(&gray, kernel);

        Ok(Image::new(src.size(), filtered.into_raw())?)
    }
}

/// Wrap a grayconv image into an `image::GrayImage`, copying the samples.
pub fn to_gray_image(src: &Image<u8, 1>) -> Result<GrayImage, ImageError> {
    GrayImage::from_raw(
        src.width() as u32,
        src.height() as u32,
        src.as_slice().to_vec(),
    )
    .ok_or(ImageError::InvalidChannelShape(
        src.numel(),
        src.size().area(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grayconv::image::ImageSize;
    use grayconv::imgproc::filter::DirectConvolution;

    #[test]
    fn test_reference_flat_image() -> Result<(), FilterError> {
        let image = Image::<u8, 1>::from_size_val(ImageSize { width: 6, height: 5 }, 100)?;
        let output = ReferenceConvolution.apply(&image, &Kernel2d::sharpen())?;
        assert_eq!(output.size(), image.size());
        assert!(output.as_slice().iter().all(|&v| v == 100));
        Ok(())
    }

    #[test]
    fn test_reference_close_to_direct() -> Result<(), FilterError> {
        let data = (0..16 * 12).map(|i| ((i * 7) % 200) as u8).collect();
        let image = Image::<u8, 1>::new(ImageSize { width: 16, height: 12 }, data)?;

        for kernel in [Kernel2d::sharpen(), Kernel2d::sobel_x(), Kernel2d::laplacian()] {
            let direct = DirectConvolution::default().apply(&image, &kernel)?;
            let reference = ReferenceConvolution.apply(&image, &kernel)?;
            // integer weights give exact sums in both backends
            assert_eq!(direct, reference);
        }
        Ok(())
    }

    #[test]
    fn test_reference_empty_image() -> Result<(), FilterError> {
        let image = Image::<u8, 1>::new(ImageSize { width: 0, height: 0 }, vec![])?;
        assert_eq!(
            ReferenceConvolution.apply(&image, &Kernel2d::identity()),
            Err(FilterError::EmptyImage(0, 0))
        );
        Ok(())
    }
}
