// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Upload**: File size limit
//! - **Render**: JPEG encoder quality
//! - **Download**: Output file name and cool-down

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Default upload size limit in mebibytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u32 = 10;

/// Smallest accepted upload limit in mebibytes.
pub const MIN_MAX_FILE_SIZE_MB: u32 = 1;

/// Largest accepted upload limit in mebibytes.
pub const MAX_MAX_FILE_SIZE_MB: u32 = 512;

// ==========================================================================
// Render Defaults
// ==========================================================================

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = crate::media::render::DEFAULT_JPEG_QUALITY;

// ==========================================================================
// Download Defaults
// ==========================================================================

/// Default name of the saved file.
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = crate::session::download::DEFAULT_FILE_NAME;

/// Default cool-down after a download starts (milliseconds).
pub const DEFAULT_DOWNLOAD_COOLDOWN_MS: u64 = 1000;

/// Longest accepted cool-down (milliseconds).
pub const MAX_DOWNLOAD_COOLDOWN_MS: u64 = 60_000;
