// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration.

// ==========================================================================
// Loader Defaults
// ==========================================================================

/// Default bounding box width used to pick the decode sample size.
pub const DEFAULT_TARGET_WIDTH: u32 = 200;

/// Default bounding box height used to pick the decode sample size.
pub const DEFAULT_TARGET_HEIGHT: u32 = 200;

// ==========================================================================
// Asset Defaults
// ==========================================================================

/// File name of the installed copy inside the data directory.
pub const DEFAULT_ASSET_FILE_NAME: &str = "sintel-wallpaper.jpg";

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
