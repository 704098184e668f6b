// SPDX-License-Identifier: MPL-2.0
//! Pure domain types.
//!
//! Nothing here depends on the GUI toolkit or on image decoding, so the
//! rules about valid adjustment values are testable in isolation.

pub mod adjustment;

pub use adjustment::{AdjustmentKind, AdjustmentSettings, Bounds};
