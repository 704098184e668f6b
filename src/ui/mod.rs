// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: each takes a
//! borrowed `ViewContext` and emits its own `Message`, which the app maps.
//!
//! - [`tabs`] - Upload / Enhance navigation
//! - [`uploader`] - Upload page
//! - [`enhance`] - Enhance page
//! - [`comparison`] - Before/after view with divider
//! - [`enhancement_controls`] - Adjustment sliders
//! - [`styles`] and [`design_tokens`] - Shared styling

pub mod comparison;
pub mod design_tokens;
pub mod enhance;
pub mod enhancement_controls;
pub mod styles;
pub mod tabs;
pub mod uploader;
