use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use srprep::ResampleFilter;

#[derive(Parser)]
#[command(
    name = "srprep",
    version,
    about = "Prepare image datasets for super-resolution training"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resize (and optionally blur) every image of a directory to a fixed size
    ResizePipeline(ResizeArgs),
    /// Write full-frame and random-crop LQ/GT pairs for every image of a directory
    CropPairGenerator(CropPairArgs),
}

/// Options shared by both commands
#[derive(Args)]
pub struct CommonArgs {
    /// JSON parameter file; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep going when an image fails; the command still exits non-zero
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Resampling filter used for every resize [default: bicubic]
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Only process files with this extension (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Hide the progress bar and informational logs
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Directory containing the original images
    pub source_dir: PathBuf,

    /// Directory where resized images will be saved
    pub target_dir: PathBuf,

    /// Size of the resized images in the format WIDTHxHEIGHT [default: 512x512]
    #[arg(long)]
    pub size: Option<String>,

    /// Gaussian blur radius applied after resizing; omit for no blur
    #[arg(long)]
    pub radius: Option<u32>,

    /// Number of parallel workers; -1 uses every core [default: -1]
    #[arg(long = "n-jobs", visible_alias = "n_jobs", allow_negative_numbers = true)]
    pub n_jobs: Option<i32>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct CropPairArgs {
    /// Directory containing the source images
    pub image_path: PathBuf,

    /// Prefix of the output roots; the LQ and GT sizes are appended to it
    pub output_dir: PathBuf,

    /// Minimum side of a random crop; smaller images get no crops [default: 128]
    #[arg(long = "crop_size_min", visible_alias = "crop-size-min")]
    pub crop_size_min: Option<u32>,

    /// Side of the low-quality images [default: 64]
    #[arg(long = "lq_size", visible_alias = "lq-size")]
    pub lq_size: Option<u32>,

    /// Side of the ground-truth images [default: 128]
    #[arg(long = "gt_size", visible_alias = "gt-size")]
    pub gt_size: Option<u32>,

    /// Random crops per image [default: 2]
    #[arg(long = "num_crops", visible_alias = "num-crops")]
    pub num_crops: Option<usize>,

    /// Number of parallel workers; -1 uses every core [default: -1]
    #[arg(long = "n_jobs", visible_alias = "n-jobs", allow_negative_numbers = true)]
    pub n_jobs: Option<i32>,

    /// Seed for reproducible crops
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}
