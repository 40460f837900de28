use std::path::{Path, PathBuf};

use grayconv::image::Image;
use grayconv::imgproc::filter::{ConvolveConfig, DirectConvolution, Filter2d};
use grayconv::imgproc::{metrics, parallel::ExecutionStrategy};

use crate::config::{KernelBank, Mode};
use crate::error::AppError;
use crate::reference::{self, ReferenceConvolution};

/// Everything a run needs besides the image pixels.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub image_path: PathBuf,
    pub mode: Mode,
    pub output_dir: PathBuf,
    pub kernels_path: Option<PathBuf>,
    pub strategy: ExecutionStrategy,
}

/// Distance between the direct and the reference output of one kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub kernel: String,
    pub mse: f32,
    pub psnr: f32,
    pub max_abs_diff: f32,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outputs: Vec<PathBuf>,
    pub comparisons: Vec<Comparison>,
}

/// Read the image, apply every kernel of the bank and write the results.
pub fn run(config: &AppConfig) -> Result<RunReport, AppError> {
    let bank = match &config.kernels_path {
        Some(path) => KernelBank::from_json_file(path)?,
        None => KernelBank::standard()?,
    };

    let decoded = image::open(&config.image_path)?;
    log::info!(
        "Image read, shape of image is ({}, {}, {})",
        decoded.height(),
        decoded.width(),
        decoded.color().channel_count()
    );
    let gray = decoded.to_luma8();
    let image = Image::<u8, 1>::new(
        [gray.width() as usize, gray.height() as usize].into(),
        gray.into_raw(),
    )?;

    std::fs::create_dir_all(&config.output_dir)?;

    let direct = DirectConvolution::new(ConvolveConfig::default().with_strategy(config.strategy));
    let reference = ReferenceConvolution;

    log::info!("Applying {} kernels in {:?} mode", bank.len(), config.mode);

    let mut report = RunReport::default();
    for (name, kernel) in bank.iter() {
        log::info!("processing {name}");

        match config.mode {
            Mode::Convolution => {
                let output = direct.apply(&image, kernel)?;
                report.outputs.push(save(&output, &config.output_dir, name, direct.name())?);
            }
            Mode::Reference => {
                let output = reference.apply(&image, kernel)?;
                report.outputs.push(save(&output, &config.output_dir, name, reference.name())?);
            }
            Mode::Compare => {
                let ours = direct.apply(&image, kernel)?;
                let theirs = reference.apply(&image, kernel)?;

                let comparison = Comparison {
                    kernel: name.to_string(),
                    mse: metrics::mse(&ours, &theirs)?,
                    psnr: metrics::psnr(&ours, &theirs, 255.0)?,
                    max_abs_diff: metrics::max_abs_diff(&ours, &theirs)?,
                };
                log::info!(
                    "{name}: mse {:.4}, psnr {:.2} dB, max abs diff {}",
                    comparison.mse,
                    comparison.psnr,
                    comparison.max_abs_diff
                );

                report.outputs.push(save(&ours, &config.output_dir, name, direct.name())?);
                report.outputs.push(save(&theirs, &config.output_dir, name, reference.name())?);
                report.comparisons.push(comparison);
            }
        }
    }

    log::info!("Wrote {} images to {}", report.outputs.len(), config.output_dir.display());

    Ok(report)
}

fn save(image: &Image<u8, 1>, dir: &Path, kernel: &str, backend: &str) -> Result<PathBuf, AppError> {
    let path = dir.join(format!("{kernel}_{backend}.png"));
    reference::to_gray_image(image)?.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use std::io::Write;

    fn write_input(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = dir.join("input.png");
        let input = GrayImage::from_fn(24, 16, |x, y| image::Luma([(x * 8 + y * 3) as u8]));
        input.save(&path)?;
        Ok(path)
    }

    fn app_config(dir: &Path, mode: Mode) -> Result<AppConfig, Box<dyn std::error::Error>> {
        Ok(AppConfig {
            image_path: write_input(dir)?,
            mode,
            output_dir: dir.join("output"),
            kernels_path: None,
            strategy: ExecutionStrategy::Serial,
        })
    }

    #[test]
    fn test_run_convolution_writes_one_image_per_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let config = app_config(tmp_dir.path(), Mode::Convolution)?;

        let report = run(&config)?;

        assert_eq!(report.outputs.len(), 6);
        assert!(report.comparisons.is_empty());
        assert!(config.output_dir.join("sharpen_convolution.png").exists());

        let output = image::open(config.output_dir.join("small_blur_convolution.png"))?;
        assert_eq!((output.width(), output.height()), (24, 16));
        Ok(())
    }

    #[test]
    fn test_run_compare_reports_every_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let mut config = app_config(tmp_dir.path(), Mode::Compare)?;
        config.strategy = ExecutionStrategy::ParallelRows;

        let report = run(&config)?;

        assert_eq!(report.outputs.len(), 12);
        assert_eq!(report.comparisons.len(), 6);
        for comparison in report.comparisons.iter() {
            assert!(comparison.max_abs_diff <= 1.0, "{comparison:?}");
        }
        assert!(config.output_dir.join("laplacian_reference.png").exists());
        Ok(())
    }

    #[test]
    fn test_run_custom_bank() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let mut config = app_config(tmp_dir.path(), Mode::Reference)?;

        let bank_path = tmp_dir.path().join("bank.json");
        let mut file = std::fs::File::create(&bank_path)?;
        write!(file, r#"[{{"name": "emboss", "weights": [[-2, -1, 0], [-1, 1, 1], [0, 1, 2]]}}]"#)?;
        config.kernels_path = Some(bank_path);

        let report = run(&config)?;

        assert_eq!(report.outputs, vec![config.output_dir.join("emboss_reference.png")]);
        Ok(())
    }

    #[test]
    fn test_run_missing_image() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let mut config = app_config(tmp_dir.path(), Mode::Convolution)?;
        config.image_path = tmp_dir.path().join("missing.png");

        assert!(run(&config).is_err());
        Ok(())
    }

    #[test]
    fn test_run_rejects_escaping_kernel_name() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let mut config = app_config(tmp_dir.path(), Mode::Convolution)?;

        let bank_path = tmp_dir.path().join("bank.json");
        let mut file = std::fs::File::create(&bank_path)?;
        write!(file, r#"[{{"name": "../escaped", "weights": [[1]]}}]"#)?;
        config.kernels_path = Some(bank_path);

        assert!(matches!(run(&config), Err(AppError::InvalidKernelName(_))));
        assert!(!tmp_dir.path().join("escaped_convolution.png").exists());
        assert!(!config.output_dir.exists());
        Ok(())
    }
}
