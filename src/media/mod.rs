// SPDX-License-Identifier: MPL-2.0
//! Image handling: upload, filter compilation, rendering and comparison.
//!
//! The pipeline is `upload` → [`SourceImage`] → `filter::compile` →
//! `render::render` → [`RenderedImage`]. None of these modules depend on the
//! GUI toolkit.

pub mod comparison;
pub mod filter;
pub mod pixel_ops;
pub mod render;
pub mod source;
pub mod upload;

// Re-export commonly used types
pub use comparison::DividerPosition;
pub use filter::{compile, sharpen_prepass, CompiledFilter, FilterChain, FilterOp};
pub use render::{render, RenderOptions, RenderedImage};
pub use source::SourceImage;
pub use upload::{
    first_candidate, is_accepted_extension, read_upload, read_upload_async, ACCEPTED_EXTENSIONS,
    DEFAULT_MAX_UPLOAD_BYTES,
};
