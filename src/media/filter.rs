// SPDX-License-Identifier: MPL-2.0
//! Compilation of adjustment settings into an ordered filter chain.
//!
//! The chain mirrors CSS filter functions: its `Display` output is the
//! filter string a canvas would accept, and [`crate::media::pixel_ops`]
//! applies the same functions to RGBA buffers.

use crate::domain::AdjustmentSettings;
use std::fmt;

/// Fixed brightness of the auxiliary sharpen term.
pub const SHARPEN_AUX_BRIGHTNESS_PERCENT: f32 = 95.0;
/// Fixed contrast of the auxiliary sharpen term.
pub const SHARPEN_AUX_CONTRAST_PERCENT: f32 = 120.0;
/// Blur intensity is divided by this to get a radius in pixels.
pub const BLUR_RADIUS_DIVISOR: f32 = 20.0;
/// Sharpness at which the pre-pass reaches strength 1.0.
pub const SHARPEN_STRENGTH_DIVISOR: f32 = 50.0;

/// One filter function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Linear multiplier in percent.
    Brightness(f32),
    /// Contrast around mid-gray in percent.
    Contrast(f32),
    /// Saturation in percent.
    Saturate(f32),
    /// Gaussian blur, standard deviation in pixels.
    Blur(f32),
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Brightness(p) => write!(f, "brightness({p}%)"),
            FilterOp::Contrast(p) => write!(f, "contrast({p}%)"),
            FilterOp::Saturate(p) => write!(f, "saturate({p}%)"),
            FilterOp::Blur(px) => write!(f, "blur({px}px)"),
        }
    }
}

/// Ordered sequence of filter functions, applied left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: FilterOp) {
        self.ops.push(op);
    }

    #[must_use]
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromIterator<FilterOp> for FilterChain {
    fn from_iter<I: IntoIterator<Item = FilterOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, op) in self.ops.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Output of [`compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    pub chain: FilterChain,
    /// True iff every setting equals its neutral value.
    pub is_default: bool,
}

/// Maps settings to the final filter chain.
///
/// Order is fixed: brightness, contrast, saturate, then the auxiliary
/// sharpen term when sharpness is non-zero, then blur when blur is non-zero.
/// The sharpen term does not scale with sharpness; only the pre-pass does.
#[must_use]
pub fn compile(settings: &AdjustmentSettings) -> CompiledFilter {
    let mut chain = FilterChain::new();
    chain.push(FilterOp::Brightness(f32::from(settings.brightness())));
    chain.push(FilterOp::Contrast(f32::from(settings.contrast())));
    chain.push(FilterOp::Saturate(f32::from(settings.saturation())));

    if settings.sharpness() > 0 {
        chain.push(FilterOp::Brightness(SHARPEN_AUX_BRIGHTNESS_PERCENT));
        chain.push(FilterOp::Contrast(SHARPEN_AUX_CONTRAST_PERCENT));
    }

    if settings.blur() > 0 {
        chain.push(FilterOp::Blur(
            f32::from(settings.blur()) / BLUR_RADIUS_DIVISOR,
        ));
    }

    CompiledFilter {
        chain,
        is_default: settings.is_default(),
    }
}

/// Contrast/brightness boost drawn before the final pass when sharpening.
///
/// `strength = sharpness / 50`; contrast is `100 + 20·strength` percent and
/// brightness `95 + 5·strength` percent. Returns `None` when sharpness is 0.
#[must_use]
pub fn sharpen_prepass(settings: &AdjustmentSettings) -> Option<FilterChain> {
    if settings.sharpness() == 0 {
        return None;
    }
    let strength = f32::from(settings.sharpness()) / SHARPEN_STRENGTH_DIVISOR;
    Some(
        [
            FilterOp::Contrast(100.0 + 20.0 * strength),
            FilterOp::Brightness(95.0 + 5.0 * strength),
        ]
        .into_iter()
        .collect(),
    )
}
