// SPDX-License-Identifier: MPL-2.0
//! Download action: writes the current render to disk.
//!
//! A started download enters a short cool-down during which further requests
//! are refused. Existing files are never overwritten; the name is suffixed
//! with ` (1)`, ` (2)`, ... the way browsers do.

use crate::error::DownloadError;
use crate::media::RenderedImage;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File name offered for every download.
pub const DEFAULT_FILE_NAME: &str = "enhanced-image.jpg";

/// Cool-down after a download starts.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);

/// Upper bound on ` (n)` suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Returns the platform download directory, or the current directory.
#[must_use]
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `dir/file_name`, or the first free `dir/stem (n).ext`.
#[must_use]
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let extension = name.extension().and_then(|s| s.to_str());

    for n in 1..=MAX_NAME_ATTEMPTS {
        let numbered = match extension {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let path = dir.join(numbered);
        if !path.exists() {
            return path;
        }
    }
    candidate
}

/// Saves rendered images and tracks the cool-down window.
#[derive(Debug, Clone)]
pub struct DownloadAction {
    directory: PathBuf,
    file_name: String,
    cooldown: Duration,
    started_at: Option<Instant>,
}

impl DownloadAction {
    #[must_use]
    pub fn new(directory: PathBuf, file_name: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            directory,
            file_name: file_name.into(),
            cooldown,
            started_at: None,
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// True while inside the cool-down of the last download.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.started_at.is_some()
    }

    /// Writes `image` and starts the cool-down.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::InFlight`] during the cool-down
    /// - [`DownloadError::Write`] if the directory or file cannot be written
    pub fn start(&mut self, image: &RenderedImage, now: Instant) -> Result<PathBuf, DownloadError> {
        self.tick(now);
        if self.is_in_flight() {
            return Err(DownloadError::InFlight);
        }

        std::fs::create_dir_all(&self.directory)
            .map_err(|e| DownloadError::Write(e.to_string()))?;
        let path = unique_path(&self.directory, &self.file_name);
        std::fs::write(&path, image.bytes()).map_err(|e| DownloadError::Write(e.to_string()))?;

        self.started_at = Some(now);
        tracing::info!(path = %path.display(), bytes = image.bytes().len(), "image downloaded");
        Ok(path)
    }

    /// Ends the cool-down once it has elapsed. Returns true if it just ended.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.started_at {
            Some(started) if now.saturating_duration_since(started) >= self.cooldown => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for DownloadAction {
    fn default() -> Self {
        Self::new(default_download_dir(), DEFAULT_FILE_NAME, DEFAULT_COOLDOWN)
    }
}
