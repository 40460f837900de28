use std::path::Path;

use grayconv::imgproc::filter::kernels::Kernel2d;
use grayconv::imgproc::filter::FilterError;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How the kernels are applied to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The direct sliding-window convolution.
    Convolution,
    /// The `imageproc` filtering routine.
    Reference,
    /// Run both and report how far apart they are.
    Compare,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "convolution" => Ok(Mode::Convolution),
            "reference" | "opencv" => Ok(Mode::Reference),
            "compare" => Ok(Mode::Compare),
            _ => Err(format!("Invalid mode: {s}")),
        }
    }
}

/// A named kernel as stored in a kernel bank file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Name of the kernel, used in logs and output file names.
    pub name: String,
    /// Rows of weights.
    pub weights: Vec<Vec<f64>>,
}

/// An ordered list of named kernels.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelBank {
    kernels: Vec<(String, Kernel2d)>,
}

impl KernelBank {
    /// The six kernels applied when no bank file is given.
    pub fn standard() -> Result<Self, FilterError> {
        Ok(Self {
            kernels: vec![
                ("small_blur".to_string(), Kernel2d::box_blur(7)?),
                ("large_blur".to_string(), Kernel2d::box_blur(21)?),
                ("sharpen".to_string(), Kernel2d::sharpen()),
                ("laplacian".to_string(), Kernel2d::laplacian()),
                ("sobel_x".to_string(), Kernel2d::sobel_x()),
                ("sobel_y".to_string(), Kernel2d::sobel_y()),
            ],
        })
    }

    /// Build a bank from kernel specs, validating every kernel.
    pub fn from_specs(specs: Vec<KernelSpec>) -> Result<Self, AppError> {
        if specs.is_empty() {
            return Err(AppError::EmptyKernelBank);
        }

        let mut kernels: Vec<(String, Kernel2d)> = Vec::with_capacity(specs.len());
        for spec in specs {
            check_kernel_name(&spec.name)?;
            if kernels.iter().any(|(name, _)| *name == spec.name) {
                return Err(AppError::DuplicateKernelName(spec.name));
            }
            match Kernel2d::from_rows(&spec.weights) {
                Ok(kernel) => kernels.push((spec.name, kernel)),
                Err(e) => return Err(AppError::InvalidKernel(spec.name, e)),
            }
        }

        Ok(Self { kernels })
    }

    /// Read a bank from a JSON file holding a list of [`KernelSpec`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        let specs: Vec<KernelSpec> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Self::from_specs(specs)
    }

    /// Iterate over the named kernels in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Kernel2d)> {
        self.kernels.iter().map(|(name, kernel)| (name.as_str(), kernel))
    }

    /// Number of kernels in the bank.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }
}

/// Kernel names become output file names, so they are restricted to a single
/// plain path component: ASCII letters, digits, `_`, `-` and `.`, without `..`.
fn check_kernel_name(name: &str) -> Result<(), AppError> {
    let valid = !name.is_empty()
        && name != "."
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if !valid {
        return Err(AppError::InvalidKernelName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("convolution".parse::<Mode>(), Ok(Mode::Convolution));
        assert_eq!("opencv".parse::<Mode>(), Ok(Mode::Reference));
        assert_eq!("Reference".parse::<Mode>(), Ok(Mode::Reference));
        assert_eq!("compare".parse::<Mode>(), Ok(Mode::Compare));
        assert!("fft".parse::<Mode>().is_err());
    }

    #[test]
    fn test_standard_bank() -> Result<(), FilterError> {
        let bank = KernelBank::standard()?;
        let names = bank.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["small_blur", "large_blur", "sharpen", "laplacian", "sobel_x", "sobel_y"]
        );
        let widths = bank.iter().map(|(_, k)| k.width()).collect::<Vec<_>>();
        assert_eq!(widths, vec![7, 21, 3, 3, 3, 3]);
        Ok(())
    }

    #[test]
    fn test_bank_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"[
                {{"name": "edge", "weights": [[-1, 0, 1]]}},
                {{"name": "identity", "weights": [[1]]}}
            ]"#
        )?;

        let bank = KernelBank::from_json_file(file.path())?;
        assert_eq!(bank.len(), 2);

        let (name, kernel) = bank.iter().next().ok_or("missing kernel")?;
        assert_eq!(name, "edge");
        assert_eq!(kernel.as_slice(), &[-1.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_bank_rejects_invalid_kernels() -> Result<(), Box<dyn std::error::Error>> {
        let even = KernelSpec {
            name: "even".to_string(),
            weights: vec![vec![0.25, 0.25], vec![0.25, 0.25]],
        };
        assert!(matches!(
            KernelBank::from_specs(vec![even]),
            Err(AppError::InvalidKernel(name, FilterError::InvalidKernelShape(2, 2))) if name == "even"
        ));
        assert!(matches!(
            KernelBank::from_specs(vec![]),
            Err(AppError::EmptyKernelBank)
        ));

        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"name": "not a list"}}"#)?;
        assert!(matches!(
            KernelBank::from_json_file(file.path()),
            Err(AppError::KernelBankParseError(_))
        ));
        Ok(())
    }

    fn spec(name: &str) -> KernelSpec {
        KernelSpec {
            name: name.to_string(),
            weights: vec![vec![1.0]],
        }
    }

    #[test]
    fn test_bank_rejects_unsafe_names() {
        for name in ["", ".", "..", "../escaped", "a/b", "/abs", "a\\b", "x..y", "C:evil"] {
            assert!(
                matches!(
                    KernelBank::from_specs(vec![spec(name)]),
                    Err(AppError::InvalidKernelName(n)) if n == name
                ),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_bank_accepts_plain_names() -> Result<(), AppError> {
        let bank = KernelBank::from_specs(vec![spec("edge-3x3"), spec("blur_v1.2")])?;
        assert_eq!(bank.len(), 2);
        Ok(())
    }

    #[test]
    fn test_bank_rejects_duplicate_names() {
        assert!(matches!(
            KernelBank::from_specs(vec![spec("dup"), spec("other"), spec("dup")]),
            Err(AppError::DuplicateKernelName(n)) if n == "dup"
        ));
    }
}
