//! Pixel-level reconstruction of metadata-free images.
//!
//! Stripping works by rebuilding, not by deleting: the raw sample buffer is
//! copied into a freshly allocated image of the same color mode and size, so
//! whatever the source container carried alongside the pixels never makes it
//! into the output. The encoder for the clean copy is chosen from the output
//! file extension.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageBuffer, Pixel};
use std::path::Path;

/// Rebuild an image from its raw pixel samples only.
///
/// The result has identical color mode, dimensions, and sample values, and an
/// empty metadata table by construction. No resampling, no color conversion.
pub fn rebuild_pixels(image: &DynamicImage) -> Result<DynamicImage> {
    let clean = match image {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(copy_samples(buf)?),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(copy_samples(buf)?),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(copy_samples(buf)?),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(copy_samples(buf)?),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(copy_samples(buf)?),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(copy_samples(buf)?),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(copy_samples(buf)?),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(copy_samples(buf)?),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(copy_samples(buf)?),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(copy_samples(buf)?),
        // DynamicImage is non-exhaustive; a plain buffer clone carries no
        // metadata either.
        other => other.clone(),
    };
    Ok(clean)
}

/// Write a metadata-free copy of an image to the given path.
///
/// Encode and write errors propagate to the caller; the encoder either
/// completes or the call fails.
pub fn write_clean_copy(image: &DynamicImage, output: &Path) -> Result<()> {
    let clean = rebuild_pixels(image)?;
    clean
        .save(output)
        .with_context(|| format!("Failed to save clean copy {}", output.display()))?;
    Ok(())
}

/// Copy a sample buffer into a freshly allocated buffer of the same shape.
fn copy_samples<P: Pixel>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    ImageBuffer::from_raw(src.width(), src.height(), src.as_raw().clone())
        .context("Sample buffer length does not match image dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, Rgba};
    use tempfile::TempDir;

    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, (x + y) as u8])
        }))
    }

    #[test]
    fn rebuild_preserves_mode_size_and_samples() {
        let source = gradient_rgb(13, 7);
        let clean = rebuild_pixels(&source).unwrap();

        assert_eq!(clean.dimensions(), source.dimensions());
        assert_eq!(clean.color(), source.color());
        assert_eq!(clean.as_bytes(), source.as_bytes());
    }

    #[test]
    fn rebuild_preserves_alpha_channel() {
        let source = DynamicImage::ImageRgba8(ImageBuffer::from_fn(5, 5, |x, y| {
            Rgba([x as u8, y as u8, 0, 128])
        }));
        let clean = rebuild_pixels(&source).unwrap();

        assert_eq!(clean.color(), source.color());
        assert_eq!(clean.as_bytes(), source.as_bytes());
    }

    #[test]
    fn lossless_round_trip_is_bit_identical() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("clean.png");

        let source = gradient_rgb(16, 16);
        write_clean_copy(&source, &out).unwrap();

        let reloaded = image::open(&out).unwrap();
        assert_eq!(reloaded.dimensions(), source.dimensions());
        assert_eq!(reloaded.as_bytes(), source.as_bytes());
    }

    #[test]
    fn save_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("no_such_dir").join("clean.png");
        assert!(write_clean_copy(&gradient_rgb(2, 2), &out).is_err());
    }
}
