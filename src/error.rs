// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Decode Error: {0}")]
    Decode(String),
    #[error("Encode Error: {0}")]
    Encode(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Upload Error: {0}")]
    Upload(#[from] UploadError),
    #[error("Download Error: {0}")]
    Download(#[from] DownloadError),
}

/// Recoverable failures of the upload gate.
///
/// Both are shown inline on the upload page and leave every other piece of
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UploadError {
    /// The file is larger than the configured limit; checked before reading.
    #[error("Image file size must be less than {}MB", limit / (1024 * 1024))]
    FileTooLarge { size: u64, limit: u64 },

    /// The file could not be read to completion.
    #[error("Failed to read the file")]
    FileReadFailed(String),
}

impl UploadError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::FileTooLarge { .. } => "upload-error-too-large",
            UploadError::FileReadFailed(_) => "upload-error-read-failed",
        }
    }
}

/// Reasons a download request is refused.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DownloadError {
    /// No rendered image exists yet.
    #[error("nothing to download")]
    NothingToDownload,

    /// A previous download is still inside its cool-down window.
    #[error("a download is already in progress")]
    InFlight,

    /// Writing the file failed.
    #[error("failed to write file: {0}")]
    Write(String),
}

impl DownloadError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DownloadError::NothingToDownload => "download-error-nothing",
            DownloadError::InFlight => "download-error-in-flight",
            DownloadError::Write(_) => "download-error-write",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(e) => Error::Io(e.to_string()),
            image_rs::ImageError::Encoding(e) => Error::Encode(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
