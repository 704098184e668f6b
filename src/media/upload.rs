// SPDX-License-Identifier: MPL-2.0
//! Upload gate: turns one user-selected file into a [`SourceImage`].
//!
//! The size limit is checked against file metadata before any byte is read.
//! The extension list is advisory; it feeds the file dialog filter and is
//! not enforced here, matching a browser `accept` attribute.

use crate::error::UploadError;
use crate::media::source::SourceImage;
use std::path::{Path, PathBuf};

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "webp"];

/// Returns whether `path` has one of the [`ACCEPTED_EXTENSIONS`] (case-insensitive).
#[must_use]
pub fn is_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Picks the single file to upload out of a drop or selection.
///
/// Only the first path is considered; the rest are ignored.
#[must_use]
pub fn first_candidate(paths: &[PathBuf]) -> Option<&Path> {
    paths.first().map(PathBuf::as_path)
}

/// Reads `path` into memory after checking its size.
///
/// # Errors
///
/// - [`UploadError::FileTooLarge`] when the file exceeds `max_bytes`
/// - [`UploadError::FileReadFailed`] when metadata or content cannot be read
pub fn read_upload(path: &Path, max_bytes: u64) -> Result<SourceImage, UploadError> {
    let metadata = std::fs::metadata(path).map_err(read_failed)?;
    check_size(metadata.len(), max_bytes)?;
    let bytes = std::fs::read(path).map_err(read_failed)?;
    finish(path, bytes, max_bytes)
}

/// Async variant of [`read_upload`]; suspends until the file is fully buffered.
///
/// # Errors
///
/// Same as [`read_upload`].
pub async fn read_upload_async(path: PathBuf, max_bytes: u64) -> Result<SourceImage, UploadError> {
    let metadata = tokio::fs::metadata(&path).await.map_err(read_failed)?;
    check_size(metadata.len(), max_bytes)?;
    let bytes = tokio::fs::read(&path).await.map_err(read_failed)?;
    finish(&path, bytes, max_bytes)
}

fn check_size(size: u64, limit: u64) -> Result<(), UploadError> {
    if size > limit {
        return Err(UploadError::FileTooLarge { size, limit });
    }
    Ok(())
}

fn finish(path: &Path, bytes: Vec<u8>, max_bytes: u64) -> Result<SourceImage, UploadError> {
    // The file may have grown between the metadata call and the read.
    check_size(bytes.len() as u64, max_bytes)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        "image uploaded"
    );
    Ok(SourceImage::new(bytes, file_name))
}

fn read_failed(err: std::io::Error) -> UploadError {
    UploadError::FileReadFailed(err.to_string())
}
