// SPDX-License-Identifier: MPL-2.0
//! `fitlens` is a minimal image viewer built with the Iced GUI framework.
//!
//! It installs a photo into local storage and, on request, decodes it with
//! subsampling, turns it according to its EXIF orientation and stretches it
//! to fill the window. The pipeline itself lives in [`media::loader`] and can
//! be used without the GUI.

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod media;
