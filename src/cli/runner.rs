use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use srprep::{
    BatchReport, CropPairParams, Error, ResizeParams, generate_crop_pairs, load_params,
    resize_directory,
};

use super::args::{CliArgs, Command, CommonArgs, CropPairArgs, ResizeArgs};
use super::errors::AppError;

const DEFAULT_LOG_LEVEL: &str = "info";

/// `--log` and `--quiet` pin the level; otherwise `RUST_LOG` wins over the default.
fn log_filter(common: &CommonArgs) -> EnvFilter {
    if common.log {
        EnvFilter::new("debug")
    } else if common.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

fn init_logging(common: &CommonArgs) -> Result<(), AppError> {
    let filter = log_filter(common);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn base_params<T: DeserializeOwned + Default>(config: Option<&Path>) -> Result<T, AppError> {
    match config {
        Some(path) => load_params(path).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(T::default()),
    }
}

pub fn resize_params(args: &ResizeArgs) -> Result<ResizeParams, AppError> {
    let mut params: ResizeParams = base_params(args.common.config.as_deref())?;

    if let Some(size) = &args.size {
        params.size = size.parse()?;
    }
    if let Some(radius) = args.radius {
        params.radius = Some(radius);
    }
    if let Some(n_jobs) = args.n_jobs {
        params.n_jobs = n_jobs;
    }
    if let Some(filter) = args.common.filter {
        params.filter = filter;
    }
    if !args.common.extensions.is_empty() {
        params.extensions = args.common.extensions.clone();
    }
    params.continue_on_error |= args.common.continue_on_error;
    params.progress = !args.common.quiet;

    Ok(params)
}

pub fn crop_pair_params(args: &CropPairArgs) -> Result<CropPairParams, AppError> {
    let mut params: CropPairParams = base_params(args.common.config.as_deref())?;

    if let Some(v) = args.crop_size_min {
        params.crop_size_min = v;
    }
    if let Some(v) = args.lq_size {
        params.lq_size = v;
    }
    if let Some(v) = args.gt_size {
        params.gt_size = v;
    }
    if let Some(v) = args.num_crops {
        params.num_crops = v;
    }
    if let Some(v) = args.n_jobs {
        params.n_jobs = v;
    }
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    if let Some(filter) = args.common.filter {
        params.filter = filter;
    }
    if !args.common.extensions.is_empty() {
        params.extensions = args.common.extensions.clone();
    }
    params.continue_on_error |= args.common.continue_on_error;
    params.progress = !args.common.quiet;

    Ok(params)
}

fn finish(report: BatchReport) -> Result<(), AppError> {
    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    info!("Files written: {}", report.files_written);

    if report.is_success() {
        Ok(())
    } else {
        Err(Error::BatchFailed {
            failed: report.errors,
            total: report.processed + report.errors,
        }
        .into())
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::ResizePipeline(args) => {
            init_logging(&args.common)?;
            let params = resize_params(&args)?;
            let report = resize_directory(&args.source_dir, &args.target_dir, &params)?;
            finish(report)?;
        }
        Command::CropPairGenerator(args) => {
            init_logging(&args.common)?;
            let params = crop_pair_params(&args)?;
            let report = generate_crop_pairs(&args.image_path, &args.output_dir, &params)?;
            finish(report)?;
        }
    }

    Ok(())
}
