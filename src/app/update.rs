// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers mutate the [`Studio`] and turn the work it hands back into
//! `Task`s: file reads and dialogs run on the async runtime, decoding and
//! renders on the blocking pool.

use super::Message;
use crate::error::{Error, UploadError};
use crate::i18n::fluent::I18n;
use crate::media::{
    is_accepted_extension, read_upload_async, RenderedImage, SourceImage, ACCEPTED_EXTENSIONS,
};
use crate::session::{EditorSession, LoadedImage, RenderRequest, Studio, UploadOutcome};
use crate::ui::enhance::{self, Notice};
use crate::ui::{comparison, enhancement_controls, tabs, uploader};
use iced::widget::image;
use iced::Task;
use std::path::PathBuf;
use std::time::Instant;

/// Mutable state borrowed from `App` for the duration of one update.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub studio: &'a mut Studio,
    pub frame: &'a mut Option<image::Handle>,
    pub notice: &'a mut Option<Notice>,
}

impl UpdateContext<'_> {
    /// Recomposes the before/after frame from the current session.
    fn refresh_frame(&mut self) {
        *self.frame = self
            .studio
            .session()
            .and_then(EditorSession::comparison)
            .map(|composed| {
                let (width, height) = composed.dimensions();
                image::Handle::from_rgba(width, height, composed.into_raw())
            });
    }
}

/// Runs a render on the blocking pool and reports back with its generation.
pub fn spawn_render(request: RenderRequest) -> Task<Message> {
    let generation = request.generation;
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || request.execute())
                .await
                .map_err(|e| Error::Io(e.to_string()))
                .and_then(std::convert::identity)
        },
        move |result| Message::RenderCompleted { generation, result },
    )
}

fn maybe_render(request: Option<RenderRequest>) -> Task<Message> {
    request.map_or_else(Task::none, spawn_render)
}

/// Decodes the preview pixels on the blocking pool.
async fn decode_off_thread(source: SourceImage) -> Result<LoadedImage, UploadError> {
    tokio::task::spawn_blocking(move || LoadedImage::decode(source))
        .await
        .map_err(|e| UploadError::FileReadFailed(e.to_string()))
}

async fn prepare_file(path: PathBuf, max_bytes: u64) -> Result<LoadedImage, UploadError> {
    let source = read_upload_async(path, max_bytes).await?;
    decode_off_thread(source).await
}

async fn prepare_data_url(data_url: String, max_bytes: u64) -> Result<LoadedImage, UploadError> {
    let source = tokio::task::spawn_blocking(move || SourceImage::from_data_url(&data_url, max_bytes))
        .await
        .map_err(|e| UploadError::FileReadFailed(e.to_string()))?
        .map_err(|err| match err {
            Error::Upload(upload) => upload,
            other => UploadError::FileReadFailed(other.to_string()),
        })?;
    decode_off_thread(source).await
}

/// Starts reading `path` through the upload gate as a new upload.
pub fn load_upload(studio: &mut Studio, path: PathBuf) -> Task<Message> {
    if !is_accepted_extension(&path) {
        // The list only guides the picker; the decoder has the final say.
        tracing::warn!(path = %path.display(), "file extension is not in the accepted list");
    }
    let generation = studio.begin_upload();
    Task::perform(
        prepare_file(path, studio.max_upload_bytes()),
        move |result| Message::UploadLoaded { generation, result },
    )
}

/// Startup argument: either a `data:` URL or a path on disk.
pub fn load_startup_image(studio: &mut Studio, argument: String) -> Task<Message> {
    if !argument.trim_start().starts_with("data:") {
        return load_upload(studio, PathBuf::from(argument));
    }
    let generation = studio.begin_upload();
    Task::perform(
        prepare_data_url(argument, studio.max_upload_bytes()),
        move |result| Message::UploadLoaded { generation, result },
    )
}

pub fn handle_tabs_message(ctx: &mut UpdateContext<'_>, message: tabs::Message) -> Task<Message> {
    match message {
        tabs::Message::Select(screen) => {
            ctx.studio.select_screen(screen);
            Task::none()
        }
    }
}

pub fn handle_uploader_message(
    ctx: &mut UpdateContext<'_>,
    message: uploader::Message,
) -> Task<Message> {
    match message {
        uploader::Message::Browse => {
            let title = ctx.i18n.tr("upload-dialog-title");
            let filter_name = ctx.i18n.tr("upload-dialog-filter");
            Task::perform(
                async move {
                    rfd::AsyncFileDialog::new()
                        .set_title(&title)
                        .add_filter(&filter_name, ACCEPTED_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::OpenFileDialogResult,
            )
        }
    }
}

/// A path picked in the file dialog supersedes any upload in flight.
pub fn handle_file_selected(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    match path {
        Some(path) => load_upload(ctx.studio, path),
        None => Task::none(),
    }
}

/// iced reports each file of a multi-file drop separately; only the first
/// one starts an upload.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if ctx.studio.is_upload_pending() {
        tracing::debug!(path = %path.display(), "ignoring drop while an upload is in progress");
        return Task::none();
    }
    load_upload(ctx.studio, path)
}

pub fn handle_upload_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<LoadedImage, UploadError>,
) -> Task<Message> {
    match ctx.studio.finish_upload(generation, result) {
        UploadOutcome::Accepted(request) => {
            *ctx.notice = None;
            ctx.refresh_frame();
            maybe_render(request)
        }
        UploadOutcome::Rejected | UploadOutcome::Superseded => Task::none(),
    }
}

pub fn handle_enhance_message(
    ctx: &mut UpdateContext<'_>,
    message: enhance::Message,
) -> Task<Message> {
    match message {
        enhance::Message::Comparison(comparison::Message::DividerMoved(fraction)) => {
            ctx.studio.set_divider(fraction);
            ctx.refresh_frame();
            Task::none()
        }
        enhance::Message::Controls(enhancement_controls::Message::Changed(kind, value)) => {
            maybe_render(ctx.studio.set_adjustment(kind, value))
        }
        enhance::Message::Controls(enhancement_controls::Message::Reset) => {
            maybe_render(ctx.studio.reset_adjustments())
        }
        enhance::Message::Download => {
            *ctx.notice = Some(match ctx.studio.download(Instant::now()) {
                Ok(path) => Notice::Saved(path),
                Err(err) => {
                    tracing::warn!(%err, "download refused");
                    Notice::DownloadFailed(err)
                }
            });
            Task::none()
        }
        enhance::Message::StartOver => {
            ctx.studio.start_over();
            *ctx.notice = None;
            *ctx.frame = None;
            Task::none()
        }
    }
}

pub fn handle_render_completed(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<RenderedImage, Error>,
) -> Task<Message> {
    if ctx.studio.complete_render(generation, result) {
        ctx.refresh_frame();
    }
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.studio.tick(now);
    Task::none()
}
