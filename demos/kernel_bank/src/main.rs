use std::path::PathBuf;

use argh::FromArgs;

use grayconv::imgproc::parallel::ExecutionStrategy;

mod app;
mod config;
mod error;
mod reference;

use app::AppConfig;
use config::Mode;

#[derive(FromArgs, Debug)]
/// Apply a bank of convolution kernels to a grayscale image.
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    image: PathBuf,

    /// convolution, reference (alias opencv) or compare
    #[argh(option, short = 'm', default = "String::from(\"convolution\")")]
    mode: String,

    /// directory where the filtered images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// optional JSON file with the kernels to apply
    #[argh(option, short = 'k')]
    kernels: Option<PathBuf>,

    /// number of threads for the convolution, single threaded if not set
    #[argh(option, short = 'n')]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let mode = match args.mode.parse::<Mode>() {
        Ok(mode) => mode,
        Err(e) => {
            println!("{e}");
            println!("Please choose a mode: <convolution>, <reference> (or <opencv>) or <compare>");
            return Ok(());
        }
    };

    let strategy = match args.threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::Serial,
    };

    let config = AppConfig {
        image_path: args.image,
        mode,
        output_dir: args.output_dir,
        kernels_path: args.kernels,
        strategy,
    };

    let report = app::run(&config)?;

    if let Some(worst) = report
        .comparisons
        .iter()
        .max_by(|a, b| a.max_abs_diff.total_cmp(&b.max_abs_diff))
    {
        println!(
            "Largest difference with the reference: {} ({} levels)",
            worst.kernel, worst.max_abs_diff
        );
    }

    println!("Finished, {} images written.", report.outputs.len());

    Ok(())
}
