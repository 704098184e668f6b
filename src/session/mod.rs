// SPDX-License-Identifier: MPL-2.0
//! Session controller owning all editing state.
//!
//! [`Studio`] is the single owner of the current screen, the active
//! [`EditorSession`] and the download action. The GUI forwards user intents
//! to it and runs the [`RenderRequest`]s it hands back; headless callers can
//! use [`Studio::render_now`] instead.
//!
//! Every request carries a generation number. Only the result of the most
//! recently issued request is applied, so a burst of slider changes settles
//! on the render of the final settings. Uploads are numbered the same way.

pub mod download;

pub use download::DownloadAction;

use crate::domain::{AdjustmentKind, AdjustmentSettings};
use crate::error::{DownloadError, Error, Result, UploadError};
use crate::media::comparison::{self, fit_preview, DividerPosition};
use crate::media::render::{decode_source, render};
use crate::media::{RenderOptions, RenderedImage, SourceImage, DEFAULT_MAX_UPLOAD_BYTES};
use image_rs::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Enhance,
}

/// Everything needed to run one render, detached from the studio.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub generation: u64,
    pub source: SourceImage,
    pub settings: AdjustmentSettings,
    pub options: RenderOptions,
}

impl RenderRequest {
    /// Runs the render synchronously.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn execute(&self) -> Result<RenderedImage> {
        render(&self.source, &self.settings, &self.options)
    }
}

/// An uploaded file together with its decoded preview pixels.
///
/// Decoding is the expensive part of accepting an upload, so the GUI builds
/// this on the blocking pool and hands the result to [`Studio::finish_upload`].
#[derive(Debug, Clone)]
pub struct LoadedImage {
    source: SourceImage,
    before: Option<Arc<RgbaImage>>,
}

impl LoadedImage {
    /// Decodes `source` for the comparison view.
    ///
    /// Undecodable bytes are still accepted; the session then has no
    /// preview and the first render reports the decode error.
    #[must_use]
    pub fn decode(source: SourceImage) -> Self {
        let before = match decode_source(&source) {
            Ok(image) => Some(Arc::new(fit_preview(image.to_rgba8()))),
            Err(err) => {
                tracing::warn!(%err, "uploaded file could not be decoded for preview");
                None
            }
        };
        Self { source, before }
    }

    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    #[must_use]
    pub fn before(&self) -> Option<&RgbaImage> {
        self.before.as_deref()
    }
}

/// What [`Studio::finish_upload`] did with a result.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// A newer upload was started; the result was discarded.
    Superseded,
    /// The gate rejected the file; the error is shown on the upload screen.
    Rejected,
    /// A new session is open; run the returned render.
    Accepted(Option<RenderRequest>),
}

/// State of one loaded image.
#[derive(Debug, Clone)]
pub struct EditorSession {
    source: SourceImage,
    before: Option<Arc<RgbaImage>>,
    settings: AdjustmentSettings,
    rendered: Option<RenderedImage>,
    render_error: Option<Error>,
    divider: DividerPosition,
}

impl EditorSession {
    fn new(loaded: LoadedImage) -> Self {
        let LoadedImage { source, before } = loaded;
        Self {
            source,
            before,
            settings: AdjustmentSettings::default(),
            rendered: None,
            render_error: None,
            divider: DividerPosition::default(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    #[must_use]
    pub fn settings(&self) -> &AdjustmentSettings {
        &self.settings
    }

    /// Last successful render, if any.
    #[must_use]
    pub fn rendered(&self) -> Option<&RenderedImage> {
        self.rendered.as_ref()
    }

    /// Error of the most recent render attempt, cleared by the next success.
    #[must_use]
    pub fn render_error(&self) -> Option<&Error> {
        self.render_error.as_ref()
    }

    /// Decoded source pixels at preview size, `None` if the upload is not a
    /// decodable image.
    #[must_use]
    pub fn before(&self) -> Option<&RgbaImage> {
        self.before.as_deref()
    }

    #[must_use]
    pub fn divider(&self) -> DividerPosition {
        self.divider
    }

    /// Composes before and after around the divider.
    ///
    /// Before the first render completes, the source is shown on both sides.
    #[must_use]
    pub fn comparison(&self) -> Option<RgbaImage> {
        let before = self.before.as_deref()?;
        let after = self.rendered.as_ref().map_or(before, RenderedImage::preview);
        Some(comparison::compose(before, after, self.divider))
    }
}

/// Tunables for a [`Studio`].
#[derive(Debug, Clone)]
pub struct StudioOptions {
    pub render: RenderOptions,
    pub max_upload_bytes: u64,
    pub download: DownloadAction,
}

impl Default for StudioOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            download: DownloadAction::default(),
        }
    }
}

/// Application controller.
#[derive(Debug, Clone)]
pub struct Studio {
    screen: Screen,
    session: Option<EditorSession>,
    upload_error: Option<UploadError>,
    generation: u64,
    upload_generation: u64,
    upload_pending: bool,
    render_options: RenderOptions,
    max_upload_bytes: u64,
    download: DownloadAction,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(StudioOptions::default())
    }
}

impl Studio {
    #[must_use]
    pub fn new(options: StudioOptions) -> Self {
        Self {
            screen: Screen::Upload,
            session: None,
            upload_error: None,
            generation: 0,
            upload_generation: 0,
            upload_pending: false,
            render_options: options.render,
            max_upload_bytes: options.max_upload_bytes,
            download: options.download,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditorSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.session.is_some()
    }

    /// Inline error from the last rejected upload.
    #[must_use]
    pub fn upload_error(&self) -> Option<&UploadError> {
        self.upload_error.as_ref()
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        self.render_options
    }

    /// Switches tabs. `Enhance` requires a loaded image; returns whether the
    /// screen changed.
    pub fn select_screen(&mut self, screen: Screen) -> bool {
        if screen == Screen::Enhance && self.session.is_none() {
            return false;
        }
        let changed = self.screen != screen;
        self.screen = screen;
        changed
    }

    /// True between [`Studio::begin_upload`] and the matching
    /// [`Studio::finish_upload`].
    #[must_use]
    pub fn is_upload_pending(&self) -> bool {
        self.upload_pending
    }

    /// Numbers a new upload. Results of earlier uploads still in flight will
    /// be discarded.
    pub fn begin_upload(&mut self) -> u64 {
        self.upload_generation += 1;
        self.upload_pending = true;
        self.upload_generation
    }

    /// Applies the result of upload `generation` if it is the latest one.
    ///
    /// Success replaces any current session and opens the enhance screen;
    /// failure records the error and leaves the current session in place.
    pub fn finish_upload(
        &mut self,
        generation: u64,
        result: std::result::Result<LoadedImage, UploadError>,
    ) -> UploadOutcome {
        if generation != self.upload_generation {
            tracing::debug!(
                generation,
                latest = self.upload_generation,
                "dropping superseded upload"
            );
            return UploadOutcome::Superseded;
        }
        self.upload_pending = false;

        match result {
            Ok(loaded) => {
                self.upload_error = None;
                self.session = Some(EditorSession::new(loaded));
                self.screen = Screen::Enhance;
                UploadOutcome::Accepted(self.render_request())
            }
            Err(err) => {
                tracing::warn!(%err, "upload rejected");
                self.upload_error = Some(err);
                self.screen = Screen::Upload;
                UploadOutcome::Rejected
            }
        }
    }

    /// Hands the outcome of the upload gate to the studio, decoding on the
    /// calling thread.
    ///
    /// Same rules as [`Studio::finish_upload`] for a freshly started upload.
    pub fn accept_upload(
        &mut self,
        result: std::result::Result<SourceImage, UploadError>,
    ) -> Option<RenderRequest> {
        let generation = self.begin_upload();
        match self.finish_upload(generation, result.map(LoadedImage::decode)) {
            UploadOutcome::Accepted(request) => request,
            UploadOutcome::Superseded | UploadOutcome::Rejected => None,
        }
    }

    /// Moves one slider. Returns the render to run, or `None` without an image.
    pub fn set_adjustment(&mut self, kind: AdjustmentKind, value: u16) -> Option<RenderRequest> {
        let session = self.session.as_mut()?;
        session.settings.set(kind, value);
        self.render_request()
    }

    /// Restores neutral settings.
    pub fn reset_adjustments(&mut self) -> Option<RenderRequest> {
        let session = self.session.as_mut()?;
        session.settings.reset();
        self.render_request()
    }

    /// Moves the comparison divider.
    pub fn set_divider(&mut self, fraction: f32) {
        if let Some(session) = self.session.as_mut() {
            session.divider = DividerPosition::new(fraction);
        }
    }

    /// Discards the session and returns to the upload screen.
    pub fn start_over(&mut self) {
        self.session = None;
        self.upload_error = None;
        self.screen = Screen::Upload;
        // Invalidate renders and uploads still running for the discarded image.
        self.generation += 1;
        self.upload_generation += 1;
        self.upload_pending = false;
    }

    /// Issues a render request for the current session state.
    pub fn render_request(&mut self) -> Option<RenderRequest> {
        let session = self.session.as_ref()?;
        self.generation += 1;
        Some(RenderRequest {
            generation: self.generation,
            source: session.source.clone(),
            settings: session.settings,
            options: self.render_options,
        })
    }

    /// Applies a finished render if it belongs to the latest request.
    ///
    /// On failure the previous render stays in place and the error is kept
    /// for display. Returns whether the result was applied.
    pub fn complete_render(&mut self, generation: u64, result: Result<RenderedImage>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "dropping superseded render"
            );
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match result {
            Ok(rendered) => {
                session.rendered = Some(rendered);
                session.render_error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "render failed, keeping previous image");
                session.render_error = Some(err);
            }
        }
        true
    }

    /// Renders the current state synchronously.
    ///
    /// # Errors
    ///
    /// Returns the render error; it is also recorded on the session.
    pub fn render_now(&mut self) -> Result<()> {
        let Some(request) = self.render_request() else {
            return Ok(());
        };
        let result = request.execute();
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.complete_render(request.generation, result);
        outcome
    }

    /// True iff the displayed render was made from non-neutral settings.
    #[must_use]
    pub fn enhancement_applied(&self) -> bool {
        self.session
            .as_ref()
            .and_then(EditorSession::rendered)
            .is_some_and(|rendered| !rendered.is_default())
    }

    /// Saves the current render.
    ///
    /// # Errors
    ///
    /// See [`DownloadAction::start`]; also [`DownloadError::NothingToDownload`]
    /// when no render exists.
    pub fn download(&mut self, now: Instant) -> std::result::Result<PathBuf, DownloadError> {
        let rendered = self
            .session
            .as_ref()
            .and_then(EditorSession::rendered)
            .ok_or(DownloadError::NothingToDownload)?;
        self.download.start(rendered, now)
    }

    #[must_use]
    pub fn is_downloading(&self) -> bool {
        self.download.is_in_flight()
    }

    /// Advances time-based state. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.download.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{DynamicImage, ImageFormat, Rgba};
    use std::io::Cursor;
    use std::time::Duration;
    use tempfile::tempdir;

    fn png_source() -> SourceImage {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 6, |x, y| {
            Rgba([(x * 30) as u8, (y * 40) as u8, 90, 255])
        }))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
        SourceImage::new(bytes, Some("fixture.png".into()))
    }

    fn loaded_studio() -> Studio {
        let mut studio = Studio::default();
        studio.accept_upload(Ok(png_source()));
        studio.render_now().expect("initial render");
        studio
    }

    #[test]
    fn new_studio_starts_on_upload_without_session() {
        let studio = Studio::default();
        assert_eq!(studio.screen(), Screen::Upload);
        assert!(!studio.has_image());
        assert!(!studio.enhancement_applied());
    }

    #[test]
    fn enhance_tab_is_disabled_without_image() {
        let mut studio = Studio::default();
        assert!(!studio.select_screen(Screen::Enhance));
        assert_eq!(studio.screen(), Screen::Upload);
    }

    #[test]
    fn successful_upload_opens_enhance_with_default_settings() {
        let mut studio = Studio::default();
        let request = studio.accept_upload(Ok(png_source())).expect("render request");

        assert_eq!(studio.screen(), Screen::Enhance);
        assert!(request.settings.is_default());
        let session = studio.session().expect("session");
        assert!(session.settings().is_default());
        assert!(session.before().is_some());
    }

    #[test]
    fn failed_upload_stays_on_upload_with_error() {
        let mut studio = Studio::default();
        let err = UploadError::FileTooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert!(studio.accept_upload(Err(err.clone())).is_none());
        assert_eq!(studio.screen(), Screen::Upload);
        assert_eq!(studio.upload_error(), Some(&err));
        assert!(!studio.has_image());
    }

    #[test]
    fn failed_upload_keeps_existing_session() {
        let mut studio = loaded_studio();
        studio.select_screen(Screen::Upload);
        studio.accept_upload(Err(UploadError::FileReadFailed("denied".into())));
        assert!(studio.has_image());
        assert!(studio.select_screen(Screen::Enhance));
    }

    #[test]
    fn successful_upload_clears_previous_error() {
        let mut studio = Studio::default();
        studio.accept_upload(Err(UploadError::FileReadFailed("denied".into())));
        studio.accept_upload(Ok(png_source()));
        assert!(studio.upload_error().is_none());
    }

    #[test]
    fn only_the_latest_upload_is_applied() {
        let mut studio = Studio::default();
        let first = studio.begin_upload();
        let second = studio.begin_upload();
        assert!(studio.is_upload_pending());

        let other = SourceImage::new(png_source().bytes().to_vec(), Some("other.png".into()));
        let outcome = studio.finish_upload(second, Ok(LoadedImage::decode(other)));
        assert!(matches!(outcome, UploadOutcome::Accepted(Some(_))));
        assert!(!studio.is_upload_pending());

        let outcome = studio.finish_upload(first, Ok(LoadedImage::decode(png_source())));
        assert!(matches!(outcome, UploadOutcome::Superseded));
        assert_eq!(
            studio.session().and_then(|s| s.source().file_name()),
            Some("other.png")
        );
    }

    #[test]
    fn stale_upload_error_does_not_replace_session() {
        let mut studio = Studio::default();
        let stale = studio.begin_upload();
        let latest = studio.begin_upload();
        studio.finish_upload(latest, Ok(LoadedImage::decode(png_source())));

        let outcome = studio.finish_upload(stale, Err(UploadError::FileReadFailed("gone".into())));
        assert!(matches!(outcome, UploadOutcome::Superseded));
        assert!(studio.upload_error().is_none());
        assert_eq!(studio.screen(), Screen::Enhance);
    }

    #[test]
    fn start_over_cancels_a_pending_upload() {
        let mut studio = loaded_studio();
        let pending = studio.begin_upload();
        studio.start_over();
        assert!(!studio.is_upload_pending());

        let outcome = studio.finish_upload(pending, Ok(LoadedImage::decode(png_source())));
        assert!(matches!(outcome, UploadOutcome::Superseded));
        assert!(!studio.has_image());
    }

    #[test]
    fn loaded_image_decodes_preview_pixels() {
        let loaded = LoadedImage::decode(png_source());
        assert_eq!(loaded.before().map(RgbaImage::dimensions), Some((8, 6)));
        assert_eq!(loaded.source().file_name(), Some("fixture.png"));

        let broken = LoadedImage::decode(SourceImage::new(b"nope".to_vec(), None));
        assert!(broken.before().is_none());
    }

    #[test]
    fn adjustments_without_session_do_nothing() {
        let mut studio = Studio::default();
        assert!(studio.set_adjustment(AdjustmentKind::Blur, 50).is_none());
        assert!(studio.reset_adjustments().is_none());
        assert!(studio.render_now().is_ok());
    }

    #[test]
    fn changing_a_setting_marks_enhancement_applied() {
        let mut studio = loaded_studio();
        assert!(!studio.enhancement_applied());

        studio.set_adjustment(AdjustmentKind::Brightness, 120);
        studio.render_now().expect("render");
        assert!(studio.enhancement_applied());
        assert_eq!(
            studio.session().and_then(|s| s.rendered()).map(|r| r.settings().brightness()),
            Some(120)
        );
    }

    #[test]
    fn reset_returns_to_identity_and_clears_indicator() {
        let mut studio = loaded_studio();
        for kind in AdjustmentKind::ALL {
            studio.set_adjustment(kind, kind.bounds().max);
        }
        studio.render_now().expect("render");
        assert!(studio.enhancement_applied());

        studio.reset_adjustments();
        studio.render_now().expect("render");

        let settings = studio.session().expect("session").settings();
        assert_eq!(
            [
                settings.brightness(),
                settings.contrast(),
                settings.saturation(),
                settings.sharpness(),
                settings.blur()
            ],
            [100, 100, 100, 0, 0]
        );
        assert!(!studio.enhancement_applied());
    }

    #[test]
    fn stale_render_results_are_dropped() {
        let mut studio = loaded_studio();
        let stale = studio
            .set_adjustment(AdjustmentKind::Contrast, 60)
            .expect("request");
        let latest = studio
            .set_adjustment(AdjustmentKind::Contrast, 140)
            .expect("request");

        assert!(!studio.complete_render(stale.generation, stale.execute()));
        assert!(studio.complete_render(latest.generation, latest.execute()));
        let rendered = studio.session().and_then(|s| s.rendered()).expect("render");
        assert_eq!(rendered.settings().contrast(), 140);
    }

    #[test]
    fn failed_render_keeps_previous_image() {
        let mut studio = loaded_studio();
        let previous = studio
            .session()
            .and_then(|s| s.rendered())
            .map(|r| r.bytes().to_vec())
            .expect("render");

        let request = studio.render_request().expect("request");
        let applied = studio.complete_render(
            request.generation,
            Err(Error::Decode("corrupt".into())),
        );
        assert!(applied);

        let session = studio.session().expect("session");
        assert_eq!(session.rendered().map(|r| r.bytes().to_vec()), Some(previous));
        assert!(matches!(session.render_error(), Some(Error::Decode(_))));
    }

    #[test]
    fn undecodable_upload_reports_render_error() {
        let mut studio = Studio::default();
        studio.accept_upload(Ok(SourceImage::new(b"not an image".to_vec(), None)));
        assert!(matches!(studio.render_now(), Err(Error::Decode(_))));

        let session = studio.session().expect("session");
        assert!(session.rendered().is_none());
        assert!(session.before().is_none());
        assert!(session.comparison().is_none());
    }

    #[test]
    fn start_over_discards_session_and_in_flight_renders() {
        let mut studio = loaded_studio();
        let request = studio
            .set_adjustment(AdjustmentKind::Blur, 40)
            .expect("request");

        studio.start_over();
        assert_eq!(studio.screen(), Screen::Upload);
        assert!(!studio.has_image());
        assert!(!studio.complete_render(request.generation, request.execute()));
    }

    #[test]
    fn comparison_has_source_dimensions() {
        let mut studio = loaded_studio();
        studio.set_divider(0.25);
        let session = studio.session().expect("session");
        assert_eq!(session.divider().value(), 0.25);
        let composed = session.comparison().expect("comparison");
        assert_eq!(composed.dimensions(), (8, 6));
    }

    #[test]
    fn download_requires_a_render() {
        let mut studio = Studio::default();
        assert_eq!(
            studio.download(Instant::now()),
            Err(DownloadError::NothingToDownload)
        );
    }

    #[test]
    fn download_cooldown_is_tracked_by_tick() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut studio = Studio::new(StudioOptions {
            download: DownloadAction::new(
                dir.path().to_path_buf(),
                download::DEFAULT_FILE_NAME,
                Duration::from_millis(1000),
            ),
            ..StudioOptions::default()
        });
        studio.accept_upload(Ok(png_source()));
        studio.render_now().expect("render");

        let now = Instant::now();
        let path = studio.download(now).expect("download");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("enhanced-image.jpg"));
        assert!(studio.is_downloading());
        assert_eq!(studio.download(now), Err(DownloadError::InFlight));

        assert!(studio.tick(now + Duration::from_secs(1)));
        assert!(!studio.is_downloading());
    }
}
