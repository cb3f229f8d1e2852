// SPDX-License-Identifier: MPL-2.0
//! Image decoding, orientation and fitting.
//!
//! [`loader::load_and_resize`] ties the pieces together; the other modules
//! expose each step on its own.

pub mod bitmap;
pub mod decode;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod image;
pub mod loader;
pub mod orientation;
pub mod transform;

// Re-export commonly used types
pub use bitmap::{Bitmap, Dimensions, PixelFormat};
pub use decode::{calculate_sample_size, DecodeOptions, Decoded};
pub use image::ImageData;
pub use loader::{load_and_resize, LoadReport};
pub use orientation::{OrientationTag, RotationAngle};

/// Supported media extensions
pub mod extensions {
    /// Image file extensions the loader accepts.
    pub const IMAGE_EXTENSIONS: &[&str] =
        &["jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp"];

    /// Checks if a file path has a supported image extension.
    #[must_use]
    pub fn is_supported_image<P: AsRef<std::path::Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    }
}
