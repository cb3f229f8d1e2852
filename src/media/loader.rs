// SPDX-License-Identifier: MPL-2.0
//! Loads a photo and fits it to the display.
//!
//! The sequence is: probe bounds, pick a sample size, decode subsampled,
//! read the EXIF orientation, rotate, then stretch to the screen. Each step
//! consumes the previous bitmap, so at most one decoded raster is alive at a
//! time and an early `?` return drops whatever was in flight.

use super::bitmap::{Bitmap, Dimensions};
use super::decode::{self, DecodeOptions, Decoded};
use super::orientation::{self, OrientationTag};
use super::transform;
use crate::error::{Error, Result};
use std::path::Path;

/// What was decided while loading, kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub native: Dimensions,
    pub sample_size: u32,
    pub decoded: Dimensions,
    pub orientation: OrientationTag,
    pub rotation: orientation::RotationAngle,
    pub output: Dimensions,
}

/// Loads `path` and returns a bitmap exactly `screen` pixels in size.
///
/// `target` only steers the decode sample size.
///
/// # Errors
///
/// - [`Error::InvalidDimensions`] if `target` or `screen` has a zero side
/// - [`Error::Decode`] if the file is missing or not a decodable image
///
/// A missing or unreadable EXIF orientation is logged and treated as
/// [`OrientationTag::Normal`].
pub fn load_and_resize<P: AsRef<Path>>(
    path: P,
    target: Dimensions,
    screen: Dimensions,
) -> Result<Bitmap> {
    load_and_resize_with_report(path, target, screen).map(|(bitmap, _)| bitmap)
}

/// Same as [`load_and_resize`], also returning the decisions taken.
///
/// # Errors
///
/// See [`load_and_resize`].
pub fn load_and_resize_with_report<P: AsRef<Path>>(
    path: P,
    target: Dimensions,
    screen: Dimensions,
) -> Result<(Bitmap, LoadReport)> {
    let path = path.as_ref();
    let span = tracing::info_span!("load_and_resize", path = %path.display());
    let _guard = span.enter();

    if target.is_empty() {
        return Err(Error::InvalidDimensions(format!("target bounds {target}")));
    }
    if screen.is_empty() {
        return Err(Error::InvalidDimensions(format!("screen size {screen}")));
    }

    let native = match decode::decode_file(path, &DecodeOptions::bounds_only())? {
        Decoded::Bounds(dims) => dims,
        Decoded::Bitmap(bitmap) => bitmap.dimensions(),
    };

    let sample_size = decode::calculate_sample_size(native, target);
    tracing::debug!(%native, %target, sample_size, "Computed sample size");

    let decoded = match decode::decode_file(path, &DecodeOptions::sampled(sample_size))? {
        Decoded::Bitmap(bitmap) => bitmap,
        Decoded::Bounds(_) => {
            return Err(Error::Decode("decoder returned bounds for a full decode".into()))
        }
    };
    let decoded_dims = decoded.dimensions();
    tracing::debug!(
        decoded = %decoded_dims,
        format = ?decoded.pixel_format(),
        bytes = decoded.byte_len(),
        "Decoded subsampled bitmap"
    );

    let orientation_tag = match orientation::read_orientation(path) {
        Ok(tag) => tag,
        Err(err) => {
            tracing::warn!(error = %err, "Could not read EXIF orientation, assuming normal");
            OrientationTag::Normal
        }
    };

    let rotation = orientation::rotation_for(native, screen, orientation_tag);
    tracing::debug!(
        orientation = ?orientation_tag,
        rotation = rotation.degrees(),
        "Applying rotation"
    );

    let rotated = transform::rotate(decoded, rotation);
    let scaled = transform::scale_exact(rotated, screen);

    let report = LoadReport {
        native,
        sample_size,
        decoded: decoded_dims,
        orientation: orientation_tag,
        rotation,
        output: scaled.dimensions(),
    };
    tracing::info!(
        native = %report.native,
        sample_size = report.sample_size,
        rotation = report.rotation.degrees(),
        output = %report.output,
        "Image loaded"
    );

    Ok((scaled, report))
}
