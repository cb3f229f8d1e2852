// SPDX-License-Identifier: MPL-2.0
//! EXIF orientation reading and the rotation rule applied before display.

use super::bitmap::Dimensions;
use crate::error::{OrientationError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Values of the EXIF `Orientation` tag (0x0112).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrientationTag {
    Undefined,
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl OrientationTag {
    /// Maps the raw tag value; `None` for anything outside 0..=8.
    #[must_use]
    pub fn from_exif_value(value: u32) -> Option<Self> {
        let tag = match value {
            0 => OrientationTag::Undefined,
            1 => OrientationTag::Normal,
            2 => OrientationTag::FlipHorizontal,
            3 => OrientationTag::Rotate180,
            4 => OrientationTag::FlipVertical,
            5 => OrientationTag::Transpose,
            6 => OrientationTag::Rotate90,
            7 => OrientationTag::Transverse,
            8 => OrientationTag::Rotate270,
            _ => return None,
        };
        Some(tag)
    }

    /// The clockwise turn this tag asks for, if it is a plain rotation.
    ///
    /// Flips, transposes and `Normal` return `None`.
    #[must_use]
    pub fn explicit_rotation(self) -> Option<RotationAngle> {
        match self {
            OrientationTag::Rotate90 => Some(RotationAngle::new(90)),
            OrientationTag::Rotate180 => Some(RotationAngle::new(180)),
            OrientationTag::Rotate270 => Some(RotationAngle::new(270)),
            _ => None,
        }
    }
}

/// A clockwise quarter-turn count, stored as 0, 90, 180 or 270 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    pub const ZERO: Self = Self(0);

    /// Rounds `degrees` down to a multiple of 90 and wraps it below 360.
    #[must_use]
    pub fn new(degrees: u16) -> Self {
        Self(((degrees / 90) * 90) % 360)
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// The turn that brings a rotated bitmap back upright.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self((360 - self.0) % 360)
    }

    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }
}

/// Reads the orientation tag of the primary image in `path`.
///
/// # Errors
///
/// Every failure is an [`OrientationError`] wrapped in
/// [`crate::error::Error::Orientation`]: unreadable file, no EXIF block,
/// no orientation field, or a value outside the EXIF range.
pub fn read_orientation<P: AsRef<Path>>(path: P) -> Result<OrientationTag> {
    let file = File::open(path.as_ref()).map_err(|e| OrientationError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let exif = exif::Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| match e {
            exif::Error::NotFound(_) => OrientationError::NoExif,
            exif::Error::Io(io) => OrientationError::Io(io.to_string()),
            other => OrientationError::Malformed(other.to_string()),
        })?;

    let field = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .ok_or(OrientationError::MissingTag)?;
    let value = field
        .value
        .get_uint(0)
        .ok_or_else(|| OrientationError::Malformed(format!("{}", field.display_value())))?;

    OrientationTag::from_exif_value(value)
        .ok_or_else(|| OrientationError::InvalidValue(value).into())
}

/// Decides how far to turn a decoded image before stretching it to `screen`.
///
/// A portrait photo or a portrait screen gets a quarter turn by default.
/// The tags `Rotate90`, `Rotate180` and `Rotate270` then replace that
/// default outright; every other tag keeps it.
#[must_use]
pub fn rotation_for(native: Dimensions, screen: Dimensions, tag: OrientationTag) -> RotationAngle {
    let default = if native.is_portrait() || screen.is_portrait() {
        RotationAngle::new(90)
    } else {
        RotationAngle::ZERO
    };

    tag.explicit_rotation().unwrap_or(default)
}
