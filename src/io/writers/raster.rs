use std::path::Path;

use image::{DynamicImage, ImageFormat};

use crate::error::Result;

/// Encode `img` to `output`, picking the format from its extension.
///
/// JPEG cannot hold alpha or 16-bit samples, so such images are flattened to RGB8
/// (grayscale 8-bit stays as is).
pub fn write_image(img: &DynamicImage, output: &Path) -> Result<()> {
    let format = ImageFormat::from_path(output)?;
    if format == ImageFormat::Jpeg
        && !matches!(img, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_))
    {
        DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(output, format)?;
    } else {
        img.save_with_format(output, format)?;
    }
    Ok(())
}
