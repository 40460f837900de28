use grayconv::image::ImageError;
use grayconv::imgproc::filter::FilterError;

/// An error type for the kernel bank application.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error to read or write a file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The kernel bank file is not valid JSON or has the wrong layout.
    #[error("Failed to parse the kernel bank. {0}")]
    KernelBankParseError(#[from] serde_json::Error),

    /// A kernel of the bank is invalid.
    #[error("Invalid kernel '{0}'. {1}")]
    InvalidKernel(String, FilterError),

    /// A kernel name is not usable as a file name component.
    #[error("Invalid kernel name '{0}': use letters, digits, '_', '-' or '.' without '..'")]
    InvalidKernelName(String),

    /// Two kernels of the bank share a name.
    #[error("Duplicate kernel name '{0}'")]
    DuplicateKernelName(String),

    /// The kernel bank has no kernels.
    #[error("The kernel bank is empty")]
    EmptyKernelBank,

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageCodecError(#[from] image::ImageError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] ImageError),

    /// Error while filtering.
    #[error(transparent)]
    FilterError(#[from] FilterError),
}
