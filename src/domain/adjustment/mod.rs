// SPDX-License-Identifier: MPL-2.0
//! Adjustment settings for a single editing session.
//!
//! [`AdjustmentSettings`] holds the five slider positions. Fields are private
//! and every write goes through [`AdjustmentSettings::set`], which clamps to
//! the control's bounds, so an out-of-range value can never be observed.

pub mod bounds;

pub use bounds::{
    blur_bounds, brightness_bounds, contrast_bounds, saturation_bounds, sharpness_bounds,
    AdjustmentKind, Bounds,
};

/// The five adjustment values driving the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdjustmentSettings {
    brightness: u16,
    contrast: u16,
    saturation: u16,
    sharpness: u16,
    blur: u16,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            brightness: brightness_bounds::DEFAULT,
            contrast: contrast_bounds::DEFAULT,
            saturation: saturation_bounds::DEFAULT,
            sharpness: sharpness_bounds::DEFAULT,
            blur: blur_bounds::DEFAULT,
        }
    }
}

impl AdjustmentSettings {
    /// Brightness percentage (100 = identity).
    #[must_use]
    pub fn brightness(&self) -> u16 {
        self.brightness
    }

    /// Contrast percentage (100 = identity).
    #[must_use]
    pub fn contrast(&self) -> u16 {
        self.contrast
    }

    /// Saturation percentage (100 = identity).
    #[must_use]
    pub fn saturation(&self) -> u16 {
        self.saturation
    }

    /// Sharpen intensity (0 = off).
    #[must_use]
    pub fn sharpness(&self) -> u16 {
        self.sharpness
    }

    /// Blur intensity (0 = off).
    #[must_use]
    pub fn blur(&self) -> u16 {
        self.blur
    }

    /// Returns the value of one control.
    #[must_use]
    pub fn get(&self, kind: AdjustmentKind) -> u16 {
        match kind {
            AdjustmentKind::Brightness => self.brightness,
            AdjustmentKind::Contrast => self.contrast,
            AdjustmentKind::Saturation => self.saturation,
            AdjustmentKind::Sharpness => self.sharpness,
            AdjustmentKind::Blur => self.blur,
        }
    }

    /// Sets one control, clamping to its bounds. Returns the stored value.
    pub fn set(&mut self, kind: AdjustmentKind, value: u16) -> u16 {
        let value = kind.bounds().clamp(value);
        let slot = match kind {
            AdjustmentKind::Brightness => &mut self.brightness,
            AdjustmentKind::Contrast => &mut self.contrast,
            AdjustmentKind::Saturation => &mut self.saturation,
            AdjustmentKind::Sharpness => &mut self.sharpness,
            AdjustmentKind::Blur => &mut self.blur,
        };
        *slot = value;
        value
    }

    /// Builder-style variant of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, kind: AdjustmentKind, value: u16) -> Self {
        self.set(kind, value);
        self
    }

    /// True iff every control sits at its neutral value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        AdjustmentKind::ALL
            .iter()
            .all(|&kind| self.get(kind) == kind.bounds().default)
    }

    /// Restores every control to its neutral value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
