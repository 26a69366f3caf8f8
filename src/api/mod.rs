//! High-level, ergonomic library API: run the resize/blur pipeline or the crop pair
//! generator over a directory, or over a single image. Prefer these entrypoints over
//! the low-level processing modules when integrating srprep.
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::core::batch::{ItemFailure, WorkerPool};
use crate::core::params::{CropPairParams, ResizeParams};
use crate::core::processing::pipeline::{OutputPair, build_output_pairs, resize_and_blur};
use crate::error::Result;
use crate::io::naming::{OutputRoots, crop_file_name, source_file_name};
use crate::io::progress::BatchProgress;
use crate::io::scan::list_source_images;
use crate::io::writers::write_image;

/// Batch processing report
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: usize,
    /// Directory entries that did not match the image filter
    pub skipped: usize,
    pub errors: usize,
    pub files_written: usize,
    /// Per-image failures, only populated when continuing on error
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

fn open_source(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Resize (and optionally blur) one image into `target_dir`, keeping its file name.
/// Returns the written path.
pub fn resize_image_file(
    input: &Path,
    target_dir: &Path,
    params: &ResizeParams,
) -> Result<PathBuf> {
    let img = open_source(input)?;
    let out = resize_and_blur(&img, params.size, params.radius, params.filter)?;
    let output = target_dir.join(source_file_name(input)?);
    write_image(&out, &output)?;
    Ok(output)
}

/// Resize every matched image of `source_dir` into `target_dir` (created if needed).
/// Existing files of the same name are overwritten.
pub fn resize_directory(
    source_dir: &Path,
    target_dir: &Path,
    params: &ResizeParams,
) -> Result<BatchReport> {
    let listing = list_source_images(source_dir, &params.extensions)?;
    let pool = WorkerPool::new(params.n_jobs)?;
    fs::create_dir_all(target_dir)?;

    info!(
        "Resizing {} images from {:?} to {:?} at {} (blur radius: {:?}, workers: {})",
        listing.images.len(),
        source_dir,
        target_dir,
        params.size,
        params.radius,
        pool.workers()
    );

    let progress = BatchProgress::for_batch(params.progress, listing.images.len());
    let outcome = pool.run(
        &listing.images,
        params.continue_on_error,
        &progress,
        |_, path| resize_image_file(path, target_dir, params).map(|_| 1),
    );
    progress.finish();
    let outcome = outcome?;

    Ok(BatchReport {
        processed: outcome.processed,
        skipped: listing.skipped,
        errors: outcome.failures.len(),
        files_written: outcome.files_written,
        failures: outcome.failures,
    })
}

fn write_pairs(input: &Path, roots: &OutputRoots, pairs: &[OutputPair]) -> Result<usize> {
    let mut written = 0;
    for (index, pair) in pairs.iter().enumerate() {
        let name = match index {
            0 => source_file_name(input)?,
            n => crop_file_name(input, n - 1)?,
        };
        let lq_path = roots.lq.join(&name);
        write_image(&pair.lq, &lq_path)?;
        if let Err(e) = write_image(&pair.gt, &roots.gt.join(&name)) {
            // An LQ file is never left behind without its GT counterpart
            if let Err(cleanup) = fs::remove_file(&lq_path) {
                warn!("Could not remove unpaired LQ file {:?}: {}", lq_path, cleanup);
            }
            return Err(e);
        }
        written += 2;
    }
    Ok(written)
}

/// Render and write the full-frame pair and every crop pair for one image.
/// Returns the number of files written.
pub fn crop_pairs_for_image<R: Rng>(
    input: &Path,
    roots: &OutputRoots,
    params: &CropPairParams,
    rng: &mut R,
) -> Result<usize> {
    let img = open_source(input)?;
    let pairs = build_output_pairs(
        &img,
        params.crop_size_min,
        params.lq_size,
        params.gt_size,
        params.num_crops,
        params.filter,
        rng,
    )?;
    if pairs.len() == 1 && params.num_crops > 0 {
        debug!(
            "{:?} is {}x{}, not larger than crop_size_min {}; writing full frame only",
            input,
            img.width(),
            img.height(),
            params.crop_size_min
        );
    }
    write_pairs(input, roots, &pairs)
}

/// Per-image random source: seeded images are reproducible regardless of which
/// worker picks them up.
pub fn image_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_os_rng(),
    }
}

/// Generate LQ/GT pairs for every image of `image_dir` into `output_prefix + lq_size`
/// and `output_prefix + gt_size`.
pub fn generate_crop_pairs(
    image_dir: &Path,
    output_prefix: &Path,
    params: &CropPairParams,
) -> Result<BatchReport> {
    params.validate()?;
    let listing = list_source_images(image_dir, &params.extensions)?;
    let pool = WorkerPool::new(params.n_jobs)?;
    let roots = OutputRoots::from_prefix(output_prefix, params.lq_size, params.gt_size);
    if roots.coincide() {
        warn!(
            "lq_size and gt_size are both {}; LQ and GT files share {:?} and overwrite each other",
            params.lq_size, roots.lq
        );
    }
    fs::create_dir_all(&roots.lq)?;
    fs::create_dir_all(&roots.gt)?;

    info!(
        "Generating crop pairs for {} images from {:?} into {:?} and {:?} \
         (crops: {}, min side: {}, workers: {})",
        listing.images.len(),
        image_dir,
        roots.lq,
        roots.gt,
        params.num_crops,
        params.crop_size_min,
        pool.workers()
    );

    let progress = BatchProgress::for_batch(params.progress, listing.images.len());
    let outcome = pool.run(
        &listing.images,
        params.continue_on_error,
        &progress,
        |index, path| {
            let mut rng = image_rng(params.seed, index);
            crop_pairs_for_image(path, &roots, params, &mut rng)
        },
    );
    progress.finish();
    let outcome = outcome?;

    Ok(BatchReport {
        processed: outcome.processed,
        skipped: listing.skipped,
        errors: outcome.failures.len(),
        files_written: outcome.files_written,
        failures: outcome.failures,
    })
}
