use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, ImageBuffer, Pixel};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ResampleFilter, TargetSize};

fn resize_options(filter: ResampleFilter) -> ResizeOptions {
    let alg = match filter {
        ResampleFilter::Nearest => ResizeAlg::Nearest,
        ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleFilter::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    };
    ResizeOptions::new().resize_alg(alg)
}

fn resize_u8_buffer(
    data: &[u8],
    pixel_type: PixelType,
    (src_cols, src_rows): (u32, u32),
    target: TargetSize,
    filter: ResampleFilter,
) -> Result<Vec<u8>> {
    let src_image =
        Image::from_vec_u8(src_cols, src_rows, data.to_vec(), pixel_type).map_err(Error::resize)?;
    let mut dst_image = Image::new(target.width, target.height, pixel_type);
    Resizer::new()
        .resize(&src_image, &mut dst_image, &resize_options(filter))
        .map_err(Error::resize)?;
    Ok(dst_image.into_vec())
}

fn resize_u16_buffer(
    data: &[u16],
    pixel_type: PixelType,
    src_dims: (u32, u32),
    target: TargetSize,
    filter: ResampleFilter,
) -> Result<Vec<u16>> {
    // fast_image_resize takes 16-bit pixels as little-endian bytes
    let src_bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
    let dst_bytes = resize_u8_buffer(&src_bytes, pixel_type, src_dims, target, filter)?;
    Ok(dst_bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

fn into_buffer<P: Pixel>(
    target: TargetSize,
    data: Vec<P::Subpixel>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    ImageBuffer::from_raw(target.width, target.height, data).ok_or_else(|| {
        Error::Processing(format!("resized buffer does not match {target}"))
    })
}

/// Resize to exactly `target`, ignoring the source aspect ratio.
///
/// 8-bit and 16-bit Luma, LumaA, Rgb and Rgba images keep their layout; any other
/// layout is converted to RGBA8 first.
pub fn resize_exact(
    img: &DynamicImage,
    target: TargetSize,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    let src_dims = (img.width(), img.height());
    if src_dims == (target.width, target.height) {
        return Ok(img.clone());
    }

    debug!("Resizing {}x{} -> {} ({})", src_dims.0, src_dims.1, target, filter);

    let resized = match img {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(into_buffer(
            target,
            resize_u8_buffer(buf.as_raw(), PixelType::U8, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(into_buffer(
            target,
            resize_u8_buffer(buf.as_raw(), PixelType::U8x2, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(into_buffer(
            target,
            resize_u8_buffer(buf.as_raw(), PixelType::U8x3, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(into_buffer(
            target,
            resize_u8_buffer(buf.as_raw(), PixelType::U8x4, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(into_buffer(
            target,
            resize_u16_buffer(buf.as_raw(), PixelType::U16, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(into_buffer(
            target,
            resize_u16_buffer(buf.as_raw(), PixelType::U16x2, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(into_buffer(
            target,
            resize_u16_buffer(buf.as_raw(), PixelType::U16x3, src_dims, target, filter)?,
        )?),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(into_buffer(
            target,
            resize_u16_buffer(buf.as_raw(), PixelType::U16x4, src_dims, target, filter)?,
        )?),
        other => {
            let rgba = other.to_rgba8();
            DynamicImage::ImageRgba8(into_buffer(
                target,
                resize_u8_buffer(rgba.as_raw(), PixelType::U8x4, src_dims, target, filter)?,
            )?)
        }
    };

    Ok(resized)
}
