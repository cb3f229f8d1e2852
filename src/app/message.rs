// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::{Dimensions, ImageData};
use std::path::PathBuf;

/// Messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The Resize button was pressed.
    ResizePressed,
    /// A load finished, successfully or not.
    ImageLoaded(Result<ImageData, Error>),
    /// The window was resized to this logical size.
    WindowResized(iced::Size),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Settings file to use instead of the per-user one.
    pub config_path: Option<PathBuf>,
    /// Image to display in place, overriding `[asset] source`.
    pub image_path: Option<PathBuf>,
    /// Sampling box override.
    pub target: Option<Dimensions>,
    /// Output size override.
    pub screen: Option<Dimensions>,
    /// Directory the image is installed into, instead of the per-user one.
    pub data_dir: Option<PathBuf>,
}
