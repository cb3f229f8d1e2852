// SPDX-License-Identifier: MPL-2.0
//! Bounds probing and subsampled decoding.
//!
//! JPEG files are decoded with `jpeg-decoder`'s IDCT scaling, which yields
//! 1/2, 1/4 or 1/8 of the native size without ever building the
//! full-resolution raster. Whatever reduction is left over is taken with a
//! nearest-neighbour pass. Other formats, and JPEG colour layouts the scaled
//! path does not handle, are decoded in full and stride-sampled right away.

use super::bitmap::{Bitmap, Dimensions};
use crate::error::{Error, Result};
use image_rs::imageops::FilterType;
use image_rs::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, ImageReader, Pixel, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Controls how [`decode_file`] reads an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Keep one pixel out of `sample_size` along each axis. Values below 1
    /// are treated as 1.
    pub sample_size: u32,
    /// Only read the header and report the native dimensions.
    pub just_decode_bounds: bool,
}

impl DecodeOptions {
    /// Header-only probe.
    #[must_use]
    pub fn bounds_only() -> Self {
        Self {
            sample_size: 1,
            just_decode_bounds: true,
        }
    }

    /// Full decode keeping every `sample_size`-th pixel.
    #[must_use]
    pub fn sampled(sample_size: u32) -> Self {
        Self {
            sample_size,
            just_decode_bounds: false,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::sampled(1)
    }
}

/// Result of [`decode_file`]: either the probed bounds or pixels.
#[derive(Debug)]
pub enum Decoded {
    Bounds(Dimensions),
    Bitmap(Bitmap),
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| Error::Decode(format!("{}: {e}", path.display())))
}

/// Reads the native size of an image without decoding pixel data.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file cannot be opened or its header is
/// not a recognised image.
pub fn probe_bounds<P: AsRef<Path>>(path: P) -> Result<Dimensions> {
    let path = path.as_ref();
    let (width, height) = open_reader(path)?
        .into_dimensions()
        .map_err(|e| Error::Decode(format!("{}: {e}", path.display())))?;
    Ok(Dimensions::new(width, height))
}

/// Decodes `path` according to `options`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the file is missing or its data is corrupt.
pub fn decode_file<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Decoded> {
    let path = path.as_ref();
    if options.just_decode_bounds {
        return probe_bounds(path).map(Decoded::Bounds);
    }

    let reader = open_reader(path)?;
    if options.sample_size > 1 && reader.format() == Some(ImageFormat::Jpeg) {
        if let Some(bitmap) = decode_jpeg_scaled(path, options.sample_size)? {
            return Ok(Decoded::Bitmap(bitmap));
        }
    }

    let full = reader
        .decode()
        .map_err(|e| Error::Decode(format!("{}: {e}", path.display())))?;

    Ok(Decoded::Bitmap(subsample(Bitmap::new(full), options.sample_size)))
}

/// Side length after dividing by `factor`, never below 1.
fn sampled_side(native: u32, factor: u32) -> u32 {
    (native / factor.max(1)).max(1)
}

/// Decodes a JPEG straight to `native / factor` using IDCT scaling.
///
/// Returns `Ok(None)` for pixel layouts this path does not convert (16-bit
/// grey, CMYK); the caller then falls back to a full decode.
fn decode_jpeg_scaled(path: &Path, factor: u32) -> Result<Option<Bitmap>> {
    let decode_err = |e: jpeg_decoder::Error| Error::Decode(format!("{}: {e}", path.display()));

    let file = File::open(path).map_err(|e| Error::Decode(format!("{}: {e}", path.display())))?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    decoder.read_info().map_err(decode_err)?;
    let info = decoder
        .info()
        .ok_or_else(|| Error::Decode(format!("{}: missing JPEG header", path.display())))?;

    match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 | jpeg_decoder::PixelFormat::RGB24 => {}
        jpeg_decoder::PixelFormat::L16 | jpeg_decoder::PixelFormat::CMYK32 => return Ok(None),
    }

    let wanted = Dimensions::new(
        sampled_side(u32::from(info.width), factor),
        sampled_side(u32::from(info.height), factor),
    );
    // The decoder picks the smallest IDCT scale that is still at least this big.
    let (width, height) = decoder
        .scale(
            u16::try_from(wanted.width).unwrap_or(u16::MAX),
            u16::try_from(wanted.height).unwrap_or(u16::MAX),
        )
        .map_err(decode_err)?;
    let pixels = decoder.decode().map_err(decode_err)?;

    let (width, height) = (u32::from(width), u32::from(height));
    let scaled = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => {
            GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
        _ => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
    }
    .ok_or_else(|| Error::Decode(format!("{}: short JPEG pixel data", path.display())))?;

    tracing::trace!(
        scaled_width = width,
        scaled_height = height,
        %wanted,
        "Decoded JPEG with IDCT scaling"
    );

    let bitmap = if (width, height) == (wanted.width, wanted.height) {
        scaled
    } else {
        scaled.resize_exact(wanted.width, wanted.height, FilterType::Nearest)
    };
    Ok(Some(Bitmap::new(bitmap)))
}

/// Picks the integer sampling factor that brings `native` close to `target`.
///
/// When the image exceeds the target on either axis, landscape images are
/// divided by the height ratio and everything else by the width ratio. The
/// ratio is truncated and never drops below 1, so a decode never upsamples.
#[must_use]
pub fn calculate_sample_size(native: Dimensions, target: Dimensions) -> u32 {
    if target.is_empty() {
        return 1;
    }

    let mut sample_size = 1;
    if native.height > target.height || native.width > target.width {
        sample_size = if native.width > native.height {
            native.height / target.height
        } else {
            native.width / target.width
        };
    }
    sample_size.max(1)
}

fn sample_every<P: Pixel>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    factor: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let width = sampled_side(source.width(), factor);
    let height = sampled_side(source.height(), factor);
    ImageBuffer::from_fn(width, height, |x, y| *source.get_pixel(x * factor, y * factor))
}

/// Keeps one pixel out of `factor` along each axis, starting at the origin.
///
/// Each output side is `input / factor` (at least 1). A factor of 0 or 1
/// returns the bitmap untouched.
#[must_use]
pub fn subsample(bitmap: Bitmap, factor: u32) -> Bitmap {
    if factor <= 1 {
        return bitmap;
    }

    let sampled = match bitmap.as_image() {
        DynamicImage::ImageLuma8(img) => DynamicImage::ImageLuma8(sample_every(img, factor)),
        DynamicImage::ImageLumaA8(img) => DynamicImage::ImageLumaA8(sample_every(img, factor)),
        DynamicImage::ImageRgb8(img) => DynamicImage::ImageRgb8(sample_every(img, factor)),
        DynamicImage::ImageRgba8(img) => DynamicImage::ImageRgba8(sample_every(img, factor)),
        DynamicImage::ImageLuma16(img) => DynamicImage::ImageLuma16(sample_every(img, factor)),
        DynamicImage::ImageLumaA16(img) => DynamicImage::ImageLumaA16(sample_every(img, factor)),
        DynamicImage::ImageRgb16(img) => DynamicImage::ImageRgb16(sample_every(img, factor)),
        DynamicImage::ImageRgba16(img) => DynamicImage::ImageRgba16(sample_every(img, factor)),
        DynamicImage::ImageRgb32F(img) => DynamicImage::ImageRgb32F(sample_every(img, factor)),
        DynamicImage::ImageRgba32F(img) => DynamicImage::ImageRgba32F(sample_every(img, factor)),
        other => DynamicImage::ImageRgba8(sample_every(&other.to_rgba8(), factor)),
    };
    Bitmap::new(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::fixtures::{write_jpeg, ExifFixture};
    use image_rs::Rgb;
    use std::fs;
    use tempfile::tempdir;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn sample_size_for_portrait_photo_uses_width_ratio() {
        let native = Dimensions::new(3000, 4000);
        let target = Dimensions::new(200, 200);
        assert_eq!(calculate_sample_size(native, target), 15);
    }

    #[test]
    fn sample_size_for_landscape_photo_uses_height_ratio() {
        let native = Dimensions::new(4000, 3000);
        let target = Dimensions::new(200, 200);
        assert_eq!(calculate_sample_size(native, target), 15);

        let native = Dimensions::new(4000, 2000);
        let target = Dimensions::new(100, 200);
        assert_eq!(calculate_sample_size(native, target), 10);
    }

    #[test]
    fn sample_size_is_one_when_image_fits() {
        let native = Dimensions::new(150, 120);
        let target = Dimensions::new(200, 200);
        assert_eq!(calculate_sample_size(native, target), 1);
    }

    #[test]
    fn sample_size_never_drops_to_zero() {
        // Taller than the target but narrower: width / target width == 0.
        let native = Dimensions::new(100, 300);
        let target = Dimensions::new(200, 200);
        assert_eq!(calculate_sample_size(native, target), 1);
    }

    #[test]
    fn sample_size_with_empty_target_is_one() {
        let native = Dimensions::new(100, 300);
        assert_eq!(calculate_sample_size(native, Dimensions::new(0, 0)), 1);
    }

    #[test]
    fn subsample_keeps_every_nth_pixel() {
        let bitmap = Bitmap::new(DynamicImage::ImageRgb8(gradient(10, 6)));
        let sampled = subsample(bitmap, 3);
        assert_eq!(sampled.dimensions(), Dimensions::new(3, 2));

        let rgb = sampled.as_image().to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [3, 0, 0]);
        assert_eq!(rgb.get_pixel(2, 1).0, [6, 3, 0]);
    }

    #[test]
    fn subsample_never_produces_empty_bitmap() {
        let bitmap = Bitmap::new(DynamicImage::ImageRgb8(gradient(4, 4)));
        let sampled = subsample(bitmap, 10);
        assert_eq!(sampled.dimensions(), Dimensions::new(1, 1));
    }

    #[test]
    fn subsample_by_one_is_identity() {
        let bitmap = Bitmap::new(DynamicImage::ImageRgb8(gradient(7, 5)));
        let expected = bitmap.clone();
        assert_eq!(subsample(bitmap, 1), expected);
    }

    #[test]
    fn probe_bounds_reads_header_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("probe.png");
        gradient(12, 34).save(&path).expect("failed to write png");

        let bounds = probe_bounds(&path).expect("probe should succeed");
        assert_eq!(bounds, Dimensions::new(12, 34));

        match decode_file(&path, &DecodeOptions::bounds_only()).expect("decode bounds") {
            Decoded::Bounds(dims) => assert_eq!(dims, bounds),
            Decoded::Bitmap(_) => panic!("bounds-only decode returned pixels"),
        }
    }

    #[test]
    fn decode_file_applies_sample_size() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("decode.png");
        gradient(40, 20).save(&path).expect("failed to write png");

        match decode_file(&path, &DecodeOptions::sampled(4)).expect("decode") {
            Decoded::Bitmap(bitmap) => assert_eq!(bitmap.dimensions(), Dimensions::new(10, 5)),
            Decoded::Bounds(_) => panic!("full decode returned bounds"),
        }
    }

    #[test]
    fn jpeg_decode_is_scaled_to_sampled_size() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("scaled.jpg");
        write_jpeg(&path, 300, 400, ExifFixture::None);

        let bitmap = decode_jpeg_scaled(&path, 15)
            .expect("scaled decode")
            .expect("RGB JPEG takes the scaled path");
        assert_eq!(bitmap.dimensions(), Dimensions::new(20, 26));

        match decode_file(&path, &DecodeOptions::sampled(8)).expect("decode") {
            Decoded::Bitmap(bitmap) => assert_eq!(bitmap.dimensions(), Dimensions::new(37, 50)),
            Decoded::Bounds(_) => panic!("full decode returned bounds"),
        }
    }

    #[test]
    fn jpeg_scaled_decode_matches_stride_sample_on_power_of_two() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("flat.jpg");
        // A single flat colour survives both the IDCT scale and the stride.
        RgbImage::from_pixel(64, 32, Rgb([200, 40, 40]))
            .save(&path)
            .expect("failed to write jpeg");

        let scaled = decode_jpeg_scaled(&path, 4)
            .expect("scaled decode")
            .expect("RGB JPEG takes the scaled path");
        assert_eq!(scaled.dimensions(), Dimensions::new(16, 8));

        let full = ImageReader::open(&path)
            .expect("open")
            .decode()
            .expect("full decode");
        let strided = subsample(Bitmap::new(full), 4);
        assert_eq!(strided.dimensions(), scaled.dimensions());

        let a = scaled.as_image().to_rgb8();
        let b = strided.as_image().to_rgb8();
        for (pa, pb) in a.pixels().zip(b.pixels()) {
            for channel in 0..3 {
                assert!(pa.0[channel].abs_diff(pb.0[channel]) <= 8, "{pa:?} vs {pb:?}");
            }
        }
    }

    #[test]
    fn sampled_png_decode_takes_full_path() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("wide.png");
        gradient(30, 20).save(&path).expect("failed to write png");

        match decode_file(&path, &DecodeOptions::sampled(3)).expect("decode") {
            Decoded::Bitmap(bitmap) => {
                assert_eq!(bitmap.dimensions(), Dimensions::new(10, 6));
                assert_eq!(bitmap.as_image().to_rgb8().get_pixel(1, 1).0, [3, 3, 0]);
            }
            Decoded::Bounds(_) => panic!("full decode returned bounds"),
        }
    }

    #[test]
    fn decode_missing_file_returns_decode_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("missing.jpg");

        match probe_bounds(&missing) {
            Err(Error::Decode(message)) => assert!(message.contains("missing.jpg")),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn decode_corrupt_file_returns_decode_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("corrupt.jpg");
        fs::write(&path, b"definitely not a jpeg").expect("failed to write file");

        assert!(matches!(
            decode_file(&path, &DecodeOptions::default()),
            Err(Error::Decode(_))
        ));
    }
}
