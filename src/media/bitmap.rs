// SPDX-License-Identifier: MPL-2.0
//! Decoded raster buffers passed between the loader steps.
//!
//! A [`Bitmap`] is moved from step to step: every transform takes it by value
//! and returns its successor, so the superseded raster is dropped as soon as
//! the next one exists. There is no way to keep two stages alive by accident.

use image_rs::{ColorType, DynamicImage, GenericImageView};
use std::fmt;

/// Width and height of a raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Taller than wide. Square images are not portrait.
    #[must_use]
    pub fn is_portrait(self) -> bool {
        self.width < self.height
    }

    /// True if either side is zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Channel layout of a decoded raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    L8,
    La8,
    Rgb8,
    Rgba8,
    L16,
    La16,
    Rgb16,
    Rgba16,
    Rgb32F,
    Rgba32F,
}

impl PixelFormat {
    fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 => PixelFormat::L8,
            ColorType::La8 => PixelFormat::La8,
            ColorType::Rgb8 => PixelFormat::Rgb8,
            ColorType::Rgba8 => PixelFormat::Rgba8,
            ColorType::L16 => PixelFormat::L16,
            ColorType::La16 => PixelFormat::La16,
            ColorType::Rgb16 => PixelFormat::Rgb16,
            ColorType::Rgba16 => PixelFormat::Rgba16,
            ColorType::Rgb32F => PixelFormat::Rgb32F,
            ColorType::Rgba32F => PixelFormat::Rgba32F,
            // ColorType is non-exhaustive; anything new is stored as RGBA8.
            _ => PixelFormat::Rgba8,
        }
    }
}

/// An owned, fully decoded raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: DynamicImage,
}

impl Bitmap {
    #[must_use]
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.image.dimensions().into()
    }

    #[must_use]
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::from_color_type(self.image.color())
    }

    /// Size of the pixel data held by this buffer.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.image.as_bytes().len()
    }

    #[must_use]
    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    /// Gives up the buffer, handing the raster to the caller.
    #[must_use]
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn dimensions_portrait_requires_strictly_taller() {
        assert!(Dimensions::new(3000, 4000).is_portrait());
        assert!(!Dimensions::new(4000, 3000).is_portrait());
        assert!(!Dimensions::new(500, 500).is_portrait());
    }

    #[test]
    fn dimensions_display_and_emptiness() {
        let dims = Dimensions::new(1080, 1920);
        assert_eq!(dims.to_string(), "1080x1920");
        assert!(Dimensions::new(0, 10).is_empty());
        assert!(!dims.is_empty());
    }

    #[test]
    fn bitmap_reports_pixel_format_of_decoded_image() {
        let rgb = Bitmap::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            4,
            2,
            Rgb([1, 2, 3]),
        )));
        assert_eq!(rgb.pixel_format(), PixelFormat::Rgb8);
        assert_eq!(rgb.dimensions(), Dimensions::new(4, 2));
        assert_eq!(rgb.byte_len(), 4 * 2 * 3);

        let gray = Bitmap::new(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            5,
            5,
            Luma([9]),
        )));
        assert_eq!(gray.pixel_format(), PixelFormat::L8);
        assert_eq!(gray.byte_len(), 25);
    }
}
