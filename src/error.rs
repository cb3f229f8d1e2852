// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    /// The image is missing, unreadable or not decodable.
    #[error("Decode Error: {0}")]
    Decode(String),
    #[error("Orientation Error: {0}")]
    Orientation(OrientationError),
    #[error("Invalid Dimensions: {0}")]
    InvalidDimensions(String),
    #[error("Config Error: {0}")]
    Config(String),
}

/// Reasons the EXIF orientation tag could not be read.
///
/// None of these abort a load; the loader falls back to `Normal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    /// The container carries no EXIF block at all.
    #[error("no EXIF data")]
    NoExif,

    /// EXIF is present but has no orientation field.
    #[error("orientation tag missing")]
    MissingTag,

    /// The orientation field holds a value outside 0..=8.
    #[error("invalid orientation value: {0}")]
    InvalidValue(u32),

    /// The EXIF block exists but could not be parsed.
    #[error("malformed EXIF data: {0}")]
    Malformed(String),

    /// The file could not be opened for metadata reading.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<OrientationError> for Error {
    fn from(err: OrientationError) -> Self {
        Error::Orientation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
