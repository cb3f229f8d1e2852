// SPDX-License-Identifier: MPL-2.0
//! First-run installation of the bundled image into local storage.

use crate::config::APP_NAME;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-user data directory for installed assets (`<data_dir>/FitLens`).
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Whether `dest` already holds exactly the bytes of `source`.
fn is_current_copy(source: &Path, dest: &Path) -> std::io::Result<bool> {
    if fs::metadata(source)?.len() != fs::metadata(dest)?.len() {
        return Ok(false);
    }
    Ok(fs::read(source)? == fs::read(dest)?)
}

/// Copies `source` to `dest_dir/file_name` unless an identical copy is
/// already there.
///
/// A destination left by an earlier run with different contents is
/// replaced. Returns the installed path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the destination cannot be created or the copy
/// fails. A missing `source` is only an error when nothing is installed yet.
pub fn install_asset(source: &Path, dest_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let dest = dest_dir.join(file_name);
    if dest.exists() {
        match is_current_copy(source, &dest) {
            Ok(true) => {
                tracing::debug!(dest = %dest.display(), "Asset already installed");
                return Ok(dest);
            }
            Ok(false) => {
                tracing::info!(dest = %dest.display(), "Installed asset is stale, replacing");
            }
            Err(err) if !source.exists() => {
                tracing::warn!(
                    source = %source.display(),
                    error = %err,
                    "Asset source unavailable, keeping installed copy"
                );
                return Ok(dest);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Could not compare installed asset, copying again");
            }
        }
    }

    fs::create_dir_all(dest_dir)?;
    let bytes = fs::copy(source, &dest).map_err(|e| {
        Error::Io(format!(
            "Failed to install {} to {}: {e}",
            source.display(),
            dest.display()
        ))
    })?;
    tracing::info!(
        source = %source.display(),
        dest = %dest.display(),
        bytes,
        "Installed asset"
    );
    Ok(dest)
}

/// Works out which file the viewer should load.
///
/// With a `source`, it is installed into `data_dir` (when there is one) and
/// the installed copy is used; if installing fails the source is used in
/// place. Without a `source`, a copy left by an earlier run is reused.
#[must_use]
pub fn resolve_image_path(
    source: Option<&Path>,
    data_dir: Option<&Path>,
    file_name: &str,
) -> Option<PathBuf> {
    match (source, data_dir) {
        (Some(source), Some(dir)) => match install_asset(source, dir, file_name) {
            Ok(installed) => Some(installed),
            Err(err) => {
                tracing::warn!(error = %err, "Using image in place");
                Some(source.to_path_buf())
            }
        },
        (Some(source), None) => Some(source.to_path_buf()),
        (None, Some(dir)) => {
            let installed = dir.join(file_name);
            installed.exists().then_some(installed)
        }
        (None, None) => None,
    }
}
