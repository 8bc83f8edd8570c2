use std::path::Path;

use image::{DynamicImage, GrayImage, ImageError};

/// ITU-R BT.601 luma, rounded to nearest integer.
///
/// Different decode libraries bake different coefficients into their
/// "load as grayscale" flags, so the conversion is pinned here instead of
/// delegated: Y = 0.299 R + 0.587 G + 0.114 B.
pub fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((weighted + 500) / 1000) as u8
}

/// Decode an image file to 8-bit grayscale.
///
/// Single-channel 8-bit sources pass through untouched; everything else is
/// converted pixel-wise with [`luma_bt601`].
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, ImageError> {
    let img = image::open(path)?;
    Ok(to_gray(img))
}

pub fn to_gray(img: DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray,
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            GrayImage::from_fn(width, height, |x, y| {
                let p = rgb.get_pixel(x, y);
                image::Luma([luma_bt601(p[0], p[1], p[2])])
            })
        }
    }
}
