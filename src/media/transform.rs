// SPDX-License-Identifier: MPL-2.0
//! Rotation and exact-size scaling of decoded bitmaps.
//!
//! Both functions consume their input. The returned bitmap is the only one
//! left alive once they return.

use super::bitmap::{Bitmap, Dimensions};
use super::orientation::RotationAngle;
use image_rs::imageops::FilterType;

/// Turns `bitmap` clockwise by `angle`.
///
/// A zero angle hands back the same buffer without copying.
#[must_use]
pub fn rotate(bitmap: Bitmap, angle: RotationAngle) -> Bitmap {
    let rotated = match angle.degrees() {
        90 => bitmap.as_image().rotate90(),
        180 => bitmap.as_image().rotate180(),
        270 => bitmap.as_image().rotate270(),
        _ => return bitmap,
    };
    Bitmap::new(rotated)
}

/// Stretches `bitmap` to exactly `size` with nearest-neighbour sampling.
///
/// Aspect ratio is not preserved. Zero sides are raised to 1.
#[must_use]
pub fn scale_exact(bitmap: Bitmap, size: Dimensions) -> Bitmap {
    let width = size.width.max(1);
    let height = size.height.max(1);
    if bitmap.dimensions() == Dimensions::new(width, height) {
        return bitmap;
    }
    Bitmap::new(
        bitmap
            .as_image()
            .resize_exact(width, height, FilterType::Nearest),
    )
}
