// SPDX-License-Identifier: MPL-2.0
//! Display-ready image handed to the view.

use super::bitmap::{Bitmap, Dimensions};
use iced::widget::image;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let handle = image::Handle::from_rgba(width, height, pixels);
        Self {
            handle,
            width,
            height,
        }
    }

    /// Consumes a final bitmap and moves its pixels into a display handle.
    ///
    /// RGBA8 bitmaps are moved without copying; other formats are converted
    /// once and the source buffer is dropped here.
    #[must_use]
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        let Dimensions { width, height } = bitmap.dimensions();
        let pixels = bitmap.into_image().into_rgba8().into_raw();
        Self::from_rgba(width, height, pixels)
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}
