// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::{Error, UploadError};
use crate::media::RenderedImage;
use crate::session::LoadedImage;
use crate::ui::{enhance, tabs, uploader};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Tabs(tabs::Message),
    Uploader(uploader::Message),
    Enhance(enhance::Message),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// The upload gate finished reading and decoding a file.
    UploadLoaded {
        generation: u64,
        result: Result<LoadedImage, UploadError>,
    },
    /// A background render finished.
    RenderCompleted {
        generation: u64,
        result: Result<RenderedImage, Error>,
    },
    /// Periodic tick while a download cool-down is running.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path or `data:` URL to upload on startup.
    pub file_path: Option<String>,
}
