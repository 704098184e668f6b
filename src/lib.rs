// SPDX-License-Identifier: MPL-2.0
//! `image_enhancer` adjusts a single image with five sliders and shows the
//! result next to the original.
//!
//! The editing core (`domain`, `media`, `session`) is independent of the GUI
//! and can be driven headlessly; `app` and `ui` put an iced front end on top.

pub mod app;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod session;
pub mod ui;
