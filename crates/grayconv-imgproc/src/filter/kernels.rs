use super::FilterError;

/// A 2D filter kernel with odd width and height.
///
/// The weights are stored row-major. The anchor is the center sample, so the
/// kernel reaches `(width - 1) / 2` columns and `(height - 1) / 2` rows on each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2d {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Kernel2d {
    /// Create a kernel from row-major weights.
    ///
    /// # Arguments
    ///
    /// * `width` - The number of columns, must be odd.
    /// * `height` - The number of rows, must be odd.
    /// * `data` - The `width * height` weights.
    ///
    /// # Errors
    ///
    /// * [`FilterError::InvalidKernelShape`] if a dimension is even (including zero).
    /// * [`FilterError::InvalidKernelData`] if the number of weights does not match the
    ///   shape or a weight is not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use grayconv_imgproc::filter::kernels::Kernel2d;
    ///
    /// let kernel = Kernel2d::new(3, 1, vec![0.25, 0.5, 0.25]).unwrap();
    /// assert_eq!(kernel.padding(), (1, 0));
    ///
    /// assert!(Kernel2d::new(2, 2, vec![0.25; 4]).is_err());
    /// ```
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self, FilterError> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidKernelShape(width, height));
        }

        let len = kernel_len(width, height)?;
        if data.len() != len {
            return Err(FilterError::InvalidKernelData(format!(
                "expected {len} weights for a {width}x{height} kernel, got {}",
                data.len()
            )));
        }

        if let Some(idx) = data.iter().position(|w| !w.is_finite()) {
            return Err(FilterError::InvalidKernelData(format!(
                "weight at index {idx} is not finite"
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a kernel from a list of rows of equal length.
    ///
    /// # Example
    ///
    /// ```
    /// use grayconv_imgproc::filter::kernels::Kernel2d;
    ///
    /// let kernel = Kernel2d::from_rows(&[
    ///     vec![0.0, 1.0, 0.0],
    ///     vec![1.0, -4.0, 1.0],
    ///     vec![0.0, 1.0, 0.0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(kernel, Kernel2d::laplacian());
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, FilterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        if let Some(y) = rows.iter().position(|row| row.as_ref().len() != width) {
            return Err(FilterError::InvalidKernelData(format!(
                "row {y} has {} weights, expected {width}",
                rows[y].as_ref().len()
            )));
        }

        let data = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();

        Self::new(width, height, data)
    }

    /// The 1x1 kernel leaving the image unchanged.
    pub fn identity() -> Self {
        Self {
            width: 1,
            height: 1,
            data: vec![1.0],
        }
    }

    /// Create a `size`x`size` box (averaging) kernel; all weights are `1/(size*size)`.
    pub fn box_blur(size: usize) -> Result<Self, FilterError> {
        if size % 2 == 0 {
            return Err(FilterError::InvalidKernelShape(size, size));
        }
        let len = kernel_len(size, size)?;
        Self::new(size, size, vec![1.0 / len as f64; len])
    }

    /// The 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Self::from_array([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
    }

    /// The 3x3 Laplacian edge kernel.
    pub fn laplacian() -> Self {
        Self::from_array([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])
    }

    /// The 3x3 Sobel kernel responding to horizontal gradients (vertical edges).
    pub fn sobel_x() -> Self {
        Self::from_array([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
    }

    /// The 3x3 Sobel kernel responding to vertical gradients (horizontal edges).
    pub fn sobel_y() -> Self {
        Self::from_array([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
    }

    fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self {
            width: 3,
            height: 3,
            data: rows.concat(),
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The border reach of the kernel as `(columns, rows)`.
    #[inline]
    pub fn padding(&self) -> (usize, usize) {
        ((self.width - 1) / 2, (self.height - 1) / 2)
    }

    /// Get the weight at column `x` and row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Get the row-major weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

fn kernel_len(width: usize, height: usize) -> Result<usize, FilterError> {
    width.checked_mul(height).ok_or_else(|| {
        FilterError::InvalidKernelData(format!("kernel of {width}x{height} weights is too large"))
    })
}
