// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures for integration tests.

use std::path::Path;

// The JPEG and EXIF builders are shared with the unit tests.
#[allow(dead_code)]
#[path = "../../src/media/fixtures.rs"]
mod fixtures;

use fixtures::ExifFixture;

/// Writes a `width`×`height` JPEG, with an orientation tag if given.
pub fn write_jpeg(path: &Path, width: u32, height: u32, orientation: Option<u16>) {
    let exif = orientation.map_or(ExifFixture::None, ExifFixture::Orientation);
    fixtures::write_jpeg(path, width, height, exif);
}
