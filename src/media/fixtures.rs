// SPDX-License-Identifier: MPL-2.0
//! JPEG fixtures with hand-built EXIF segments for unit tests.

use image_rs::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// EXIF content to splice into a generated JPEG.
#[derive(Debug, Clone, Copy)]
pub enum ExifFixture {
    /// No APP1 segment at all.
    None,
    /// IFD0 holds only a ResolutionUnit entry.
    WithoutOrientation,
    /// IFD0 holds an Orientation entry with this raw value.
    Orientation(u16),
}

/// Little-endian TIFF block with a single SHORT entry in IFD0.
fn tiff_with_short(tag: u16, value: u16) -> Vec<u8> {
    let mut tiff = Vec::with_capacity(26);
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}

fn app1_segment(fixture: ExifFixture) -> Option<Vec<u8>> {
    let tiff = match fixture {
        ExifFixture::None => return None,
        ExifFixture::WithoutOrientation => tiff_with_short(0x0128, 2),
        ExifFixture::Orientation(value) => tiff_with_short(0x0112, value),
    };

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    let length = u16::try_from(payload.len() + 2).expect("fixture segment fits");
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(&payload);
    Some(segment)
}

/// Encodes a `width`×`height` gradient as JPEG bytes with the given EXIF.
pub fn jpeg_bytes(width: u32, height: u32, fixture: ExifFixture) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, ImageFormat::Jpeg)
        .expect("jpeg encoding should succeed");
    let encoded = encoded.into_inner();

    match app1_segment(fixture) {
        // APP1 goes straight after SOI.
        Some(segment) => {
            let mut out = Vec::with_capacity(encoded.len() + segment.len());
            out.extend_from_slice(&encoded[..2]);
            out.extend_from_slice(&segment);
            out.extend_from_slice(&encoded[2..]);
            out
        }
        None => encoded,
    }
}

pub fn write_jpeg(path: &Path, width: u32, height: u32, fixture: ExifFixture) {
    std::fs::write(path, jpeg_bytes(width, height, fixture)).expect("failed to write jpeg");
}
