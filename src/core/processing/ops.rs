use image::DynamicImage;

use crate::core::processing::crop::CropRegion;
use crate::error::{Error, Result};

/// Gaussian blur with the given radius; radius 0 returns the image untouched
pub fn gaussian_blur(img: DynamicImage, radius: u32) -> DynamicImage {
    if radius == 0 {
        // image::imageops::blur treats sigma <= 0 as 1.0, so skip it entirely
        return img;
    }
    img.blur(radius as f32)
}

/// Copy out a square region, checking it lies inside the image
pub fn crop_region(img: &DynamicImage, region: &CropRegion) -> Result<DynamicImage> {
    if !region.is_within(img.width(), img.height()) {
        return Err(Error::Processing(format!(
            "crop region {region} exceeds image bounds {}x{}",
            img.width(),
            img.height()
        )));
    }
    Ok(img.crop_imm(region.x0, region.y0, region.side(), region.side()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn edge_image() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(32, 32, |x, _| {
            if x < 16 { Luma([0]) } else { Luma([255]) }
        }))
    }

    #[test]
    fn zero_radius_is_identity() {
        let img = edge_image();
        assert_eq!(gaussian_blur(img.clone(), 0), img);
    }

    #[test]
    fn positive_radius_softens_edges() {
        let img = edge_image();
        let blurred = gaussian_blur(img.clone(), 2).to_luma8();
        assert_ne!(DynamicImage::ImageLuma8(blurred.clone()), img);
        let at_edge = blurred.get_pixel(15, 16).0[0];
        assert!(at_edge > 0 && at_edge < 255);
    }

    #[test]
    fn crop_rejects_out_of_bounds() {
        let img = edge_image();
        let inside = CropRegion::new(8, 8, 16);
        assert_eq!(crop_region(&img, &inside).unwrap().width(), 16);
        let outside = CropRegion::new(20, 0, 16);
        assert!(crop_region(&img, &outside).is_err());
    }
}
