use crate::ImageError;

/// Width and height of an image in pixels.
///
/// ```
/// use grayconv_image::ImageSize;
///
/// let size: ImageSize = [640, 480].into();
/// assert_eq!(size.area(), 640 * 480);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `[width, height]`
impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// An owned image buffer with `CHANNELS` interleaved samples per pixel.
///
/// Samples are stored row-major, i.e. with shape (H, W, C). The buffer length
/// always equals `width * height * CHANNELS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap a row-major sample buffer.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidChannelShape`] when `data` does not hold exactly
    /// `size.area() * CHANNELS` samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use grayconv_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 2 }, vec![0, 1, 2, 3, 4, 5]).unwrap();
    /// assert_eq!(image.get_pixel(2, 1, 0).unwrap(), 5);
    ///
    /// assert!(Image::<u8, 1>::new([3, 2].into(), vec![0; 5]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Allocate an image of `size` with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use grayconv_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::from_size_val([4, 3].into(), 0.5).unwrap();
    ///
    /// assert_eq!(image.width(), 4);
    /// assert_eq!(image.height(), 3);
    /// assert!(image.as_slice().iter().all(|&v| v == 0.5));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.area() * CHANNELS])
    }

    /// Convert every sample to `U`, e.g. `u8` samples to `f32`.
    ///
    /// # Errors
    ///
    /// [`ImageError::CastError`] if a sample is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let data = self
            .data
            .iter()
            .map(|&v| U::from(v).ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().into())))
            .collect::<Result<Vec<_>, _>>()?;

        Image::new(self.size, data)
    }

    /// The image size.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Alias of [`Image::width`].
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Alias of [`Image::height`].
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Samples per pixel.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Number of samples, i.e. pixels times channels.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The samples, row-major.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The samples, row-major, for in-place writes.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to the value at `(x, y)` in channel `ch`.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        if x >= self.width() || y >= self.height() || ch >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + ch)
    }

    /// Get the value at `(x, y)` in channel `ch`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] for indices outside the image.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        self.get(x, y, ch).copied().ok_or(ImageError::PixelIndexOutOfBounds(
            x,
            y,
            self.width(),
            self.height(),
        ))
    }

    /// Set the value at `(x, y)` in channel `ch`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] for indices outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() || ch >= CHANNELS {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let idx = (y * self.width() + x) * CHANNELS + ch;
        self.data[idx] = val;
        Ok(())
    }
}
