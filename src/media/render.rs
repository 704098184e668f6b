// SPDX-License-Identifier: MPL-2.0
//! Renders a source image through the compiled filter chain.
//!
//! Every call is a full render: decode, draw the baseline, draw the optional
//! sharpen pre-pass, draw the filtered pass, then flatten and encode to JPEG.
//! Nothing is cached between calls, so the result depends only on the
//! `(source, settings, options)` triple.

use crate::domain::AdjustmentSettings;
use crate::error::{Error, Result};
use crate::media::comparison::fit_preview;
use crate::media::filter::{compile, sharpen_prepass};
use crate::media::pixel_ops::{apply_chain, draw_over, flatten_on_black};
use crate::media::source::{encode_data_url, SourceImage};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, GenericImageView, Rgba32FImage, RgbaImage};
use std::sync::Arc;
use std::time::Instant;

/// JPEG quality used when nothing else is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// MIME type of every rendered image.
pub const RENDERED_MIME_TYPE: &str = "image/jpeg";

/// Encoder options for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    jpeg_quality: u8,
}

impl RenderOptions {
    /// Creates options with a JPEG quality clamped to `1..=100`.
    #[must_use]
    pub fn with_quality(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn jpeg_quality(self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::with_quality(DEFAULT_JPEG_QUALITY)
    }
}

/// Result of one render pass.
///
/// Cheap to clone: the encoded bytes and preview pixels are shared.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    jpeg: Arc<[u8]>,
    width: u32,
    height: u32,
    preview: Arc<RgbaImage>,
    settings: AdjustmentSettings,
    is_default: bool,
}

impl RenderedImage {
    /// JPEG-encoded output.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.jpeg
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Settings this image was rendered from.
    #[must_use]
    pub fn settings(&self) -> &AdjustmentSettings {
        &self.settings
    }

    /// True when rendered from neutral settings.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Flattened pixels before JPEG compression, scaled down with
    /// [`fit_preview`] for on-screen display.
    #[must_use]
    pub fn preview(&self) -> &RgbaImage {
        &self.preview
    }

    #[must_use]
    pub fn to_data_url(&self) -> String {
        encode_data_url(RENDERED_MIME_TYPE, &self.jpeg)
    }

    /// Decodes the JPEG bytes back to pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the stored bytes are not a valid JPEG.
    pub fn decode(&self) -> Result<RgbaImage> {
        image_rs::load_from_memory_with_format(&self.jpeg, image_rs::ImageFormat::Jpeg)
            .map(|img| img.to_rgba8())
            .map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Decodes the uploaded bytes, guessing the format from content.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not a supported image.
pub fn decode_source(source: &SourceImage) -> Result<DynamicImage> {
    image_rs::load_from_memory(source.bytes()).map_err(|e| Error::Decode(e.to_string()))
}

/// Renders `source` with `settings`.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the source cannot be decoded and
/// [`Error::Encode`] if JPEG encoding fails. No partial output is produced.
pub fn render(
    source: &SourceImage,
    settings: &AdjustmentSettings,
    options: &RenderOptions,
) -> Result<RenderedImage> {
    let started = Instant::now();

    let decoded = decode_source(source)?;
    let (width, height) = decoded.dimensions();
    let image = decoded.to_rgba32f();
    let compiled = compile(settings);

    let mut surface = Rgba32FImage::new(width, height);
    draw_over(&mut surface, &image);

    if let Some(prepass) = sharpen_prepass(settings) {
        draw_over(&mut surface, &apply_chain(&image, &prepass));
    }

    draw_over(&mut surface, &apply_chain(&image, &compiled.chain));

    let flattened = flatten_on_black(&surface);
    let jpeg = encode_jpeg(&flattened, options.jpeg_quality())?;
    let preview = fit_preview(DynamicImage::ImageRgb8(flattened).to_rgba8());

    tracing::debug!(
        width,
        height,
        filter = %compiled.chain,
        bytes = jpeg.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "rendered image"
    );

    Ok(RenderedImage {
        jpeg: jpeg.into(),
        width,
        height,
        preview: Arc::new(preview),
        settings: *settings,
        is_default: compiled.is_default,
    })
}

fn encode_jpeg(image: &image_rs::RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(image)
        .map_err(|e| Error::Encode(e.to_string()))?;
    Ok(buffer)
}
