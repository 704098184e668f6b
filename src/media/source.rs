// SPDX-License-Identifier: MPL-2.0
//! The uploaded image, kept byte-exact for the whole editing session.

use crate::error::{Error, Result, UploadError};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use std::sync::Arc;

const FALLBACK_MIME: &str = "application/octet-stream";
const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Immutable copy of the user-provided file.
///
/// The bytes are shared through an `Arc` so render requests can carry the
/// source to a worker without copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    bytes: Arc<[u8]>,
    mime_type: String,
    file_name: Option<String>,
}

impl SourceImage {
    /// Wraps encoded bytes, detecting the MIME type from `file_name`'s
    /// extension first and from the content second.
    #[must_use]
    pub fn new(bytes: Vec<u8>, file_name: Option<String>) -> Self {
        let mime_type = file_name
            .as_deref()
            .and_then(mime_from_extension)
            .or_else(|| mime_from_content(&bytes))
            .unwrap_or(FALLBACK_MIME)
            .to_string();

        Self {
            bytes: bytes.into(),
            mime_type,
            file_name,
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    ///
    /// The decoded size is estimated from the payload length and checked
    /// against `max_bytes` before anything is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for malformed URLs or payloads and
    /// [`UploadError::FileTooLarge`] when the payload would exceed `max_bytes`.
    pub fn from_data_url(data_url: &str, max_bytes: u64) -> Result<Self> {
        let normalized = data_url.trim();
        let rest = normalized
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| Error::Decode("missing data: scheme".into()))?;
        let marker = rest
            .find(BASE64_MARKER)
            .ok_or_else(|| Error::Decode("missing base64 marker".into()))?;
        let mime_type = &rest[..marker];
        let payload = &rest[marker + BASE64_MARKER.len()..];

        let estimated = estimate_decoded_len(payload);
        if estimated > max_bytes {
            return Err(UploadError::FileTooLarge {
                size: estimated,
                limit: max_bytes,
            }
            .into());
        }

        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::Decode(format!("invalid base64 payload: {e}")))?;
        let decoded = bytes.len() as u64;
        if decoded > max_bytes {
            return Err(UploadError::FileTooLarge {
                size: decoded,
                limit: max_bytes,
            }
            .into());
        }

        let mime_type = if mime_type.is_empty() {
            mime_from_content(&bytes).unwrap_or(FALLBACK_MIME)
        } else {
            mime_type
        };

        Ok(Self {
            bytes: bytes.into(),
            mime_type: mime_type.to_string(),
            file_name: None,
        })
    }

    /// The encoded bytes exactly as uploaded.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Encodes the source as a self-contained data URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        encode_data_url(&self.mime_type, &self.bytes)
    }
}

/// Builds `data:<mime>;base64,<payload>`.
#[must_use]
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "{DATA_URL_PREFIX}{mime_type}{BASE64_MARKER}{}",
        general_purpose::STANDARD.encode(bytes)
    )
}

fn estimate_decoded_len(payload: &str) -> u64 {
    let payload = payload.trim();
    let padding = payload.bytes().rev().take(2).take_while(|&b| b == b'=').count() as u64;
    (payload.len() as u64)
        .div_ceil(4)
        .saturating_mul(3)
        .saturating_sub(padding)
}

fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn mime_from_content(bytes: &[u8]) -> Option<&'static str> {
    image_rs::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
}
