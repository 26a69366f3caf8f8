use image::DynamicImage;
use rand::Rng;
use tracing::debug;

use crate::core::processing::crop::{CropRegion, sample_crop_regions};
use crate::core::processing::ops::{crop_region, gaussian_blur};
use crate::core::processing::resize::resize_exact;
use crate::error::Result;
use crate::types::{ResampleFilter, TargetSize};

/// LQ and GT renditions of one source region
#[derive(Debug, Clone)]
pub struct OutputPair {
    pub lq: DynamicImage,
    pub gt: DynamicImage,
    /// None for the full-frame pair
    pub region: Option<CropRegion>,
}

pub fn resize_and_blur(
    img: &DynamicImage,
    size: TargetSize,
    radius: Option<u32>,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    let resized = resize_exact(img, size, filter)?;
    Ok(match radius {
        Some(r) => gaussian_blur(resized, r),
        None => resized,
    })
}

pub fn render_pair(
    img: &DynamicImage,
    lq_size: u32,
    gt_size: u32,
    filter: ResampleFilter,
) -> Result<(DynamicImage, DynamicImage)> {
    let lq = resize_exact(img, TargetSize::square(lq_size)?, filter)?;
    let gt = resize_exact(img, TargetSize::square(gt_size)?, filter)?;
    Ok((lq, gt))
}

/// Full-frame pair followed by one pair per sampled crop.
///
/// Crops are only sampled when the short side exceeds `crop_size_min`, so the
/// result holds either `1 + num_crops` pairs or exactly one.
pub fn build_output_pairs<R: Rng>(
    img: &DynamicImage,
    crop_size_min: u32,
    lq_size: u32,
    gt_size: u32,
    num_crops: usize,
    filter: ResampleFilter,
    rng: &mut R,
) -> Result<Vec<OutputPair>> {
    let regions = sample_crop_regions(img.width(), img.height(), crop_size_min, num_crops, rng);
    let mut pairs = Vec::with_capacity(1 + regions.len());

    let (lq, gt) = render_pair(img, lq_size, gt_size, filter)?;
    pairs.push(OutputPair { lq, gt, region: None });

    for region in regions {
        debug!("Cropping region {}", region);
        let cropped = crop_region(img, &region)?;
        let (lq, gt) = render_pair(&cropped, lq_size, gt_size, filter)?;
        pairs.push(OutputPair {
            lq,
            gt,
            region: Some(region),
        });
    }

    Ok(pairs)
}
