//! Random square crop sampling for LQ/GT pair augmentation.
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Square region `(x0, y0)..(x1, y1)` in source pixel coordinates, `x1`/`y1` exclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CropRegion {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropRegion {
    pub fn new(x0: u32, y0: u32, side: u32) -> Self {
        Self {
            x0,
            y0,
            x1: x0 + side,
            y1: y0 + side,
        }
    }

    pub fn side(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x0 < self.x1 && self.y0 < self.y1 && self.x1 <= width && self.y1 <= height
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Whether an image is large enough to be cropped at all.
pub fn can_crop(width: u32, height: u32, crop_size_min: u32) -> bool {
    width.min(height) > crop_size_min
}

/// Sample one square region.
///
/// The side is uniform in `[crop_size_min, min(width, height)]`, then the top-left
/// corner is uniform over every position that keeps the square inside the image.
/// Returns `None` when the short side does not exceed `crop_size_min`. A minimum of 0
/// is treated as 1.
pub fn sample_crop_region<R: Rng>(
    width: u32,
    height: u32,
    crop_size_min: u32,
    rng: &mut R,
) -> Option<CropRegion> {
    if !can_crop(width, height, crop_size_min) {
        return None;
    }
    let side = rng.random_range(crop_size_min.max(1)..=width.min(height));
    let x0 = rng.random_range(0..=width - side);
    let y0 = rng.random_range(0..=height - side);
    Some(CropRegion::new(x0, y0, side))
}

/// Sample `count` independent regions; empty when the image is too small.
pub fn sample_crop_regions<R: Rng>(
    width: u32,
    height: u32,
    crop_size_min: u32,
    count: usize,
    rng: &mut R,
) -> Vec<CropRegion> {
    (0..count)
        .map_while(|_| sample_crop_region(width, height, crop_size_min, rng))
        .collect()
}
