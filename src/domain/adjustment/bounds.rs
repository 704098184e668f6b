// SPDX-License-Identifier: MPL-2.0
//! Bounds and identities for the five adjustment controls.
//!
//! Each control is an integer slider position. The bounds modules are the
//! single source of truth for ranges and neutral values; [`AdjustmentKind`]
//! exposes them generically so views and settings can iterate over controls.

// =============================================================================
// Percent Bounds
// =============================================================================

/// Brightness bounds (50% to 150%).
pub mod brightness_bounds {
    /// Minimum brightness percentage.
    pub const MIN: u16 = 50;
    /// Maximum brightness percentage.
    pub const MAX: u16 = 150;
    /// Identity brightness percentage.
    pub const DEFAULT: u16 = 100;
}

/// Contrast bounds (50% to 150%).
pub mod contrast_bounds {
    /// Minimum contrast percentage.
    pub const MIN: u16 = 50;
    /// Maximum contrast percentage.
    pub const MAX: u16 = 150;
    /// Identity contrast percentage.
    pub const DEFAULT: u16 = 100;
}

/// Saturation bounds (0% to 200%).
pub mod saturation_bounds {
    /// Minimum saturation percentage (fully desaturated).
    pub const MIN: u16 = 0;
    /// Maximum saturation percentage.
    pub const MAX: u16 = 200;
    /// Identity saturation percentage.
    pub const DEFAULT: u16 = 100;
}

// =============================================================================
// Intensity Bounds
// =============================================================================

/// Sharpness bounds (0 to 100, 0 = no effect).
pub mod sharpness_bounds {
    pub const MIN: u16 = 0;
    pub const MAX: u16 = 100;
    pub const DEFAULT: u16 = 0;
}

/// Blur bounds (0 to 100, 0 = no effect).
pub mod blur_bounds {
    pub const MIN: u16 = 0;
    pub const MAX: u16 = 100;
    pub const DEFAULT: u16 = 0;
}

// =============================================================================
// Bounds
// =============================================================================

/// Inclusive range and neutral value of one adjustment control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u16,
    pub max: u16,
    pub default: u16,
}

impl Bounds {
    /// Clamps a raw slider value into this range.
    #[must_use]
    pub fn clamp(self, value: u16) -> u16 {
        value.clamp(self.min, self.max)
    }

    /// Returns whether `value` lies inside the inclusive range.
    #[must_use]
    pub fn contains(self, value: u16) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =============================================================================
// AdjustmentKind
// =============================================================================

/// Identifies one of the five adjustment controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustmentKind {
    Brightness,
    Contrast,
    Saturation,
    Sharpness,
    Blur,
}

impl AdjustmentKind {
    /// All controls, in the order they are displayed.
    pub const ALL: [AdjustmentKind; 5] = [
        AdjustmentKind::Brightness,
        AdjustmentKind::Contrast,
        AdjustmentKind::Saturation,
        AdjustmentKind::Sharpness,
        AdjustmentKind::Blur,
    ];

    /// Returns the range and neutral value of this control.
    #[must_use]
    pub fn bounds(self) -> Bounds {
        match self {
            AdjustmentKind::Brightness => Bounds {
                min: brightness_bounds::MIN,
                max: brightness_bounds::MAX,
                default: brightness_bounds::DEFAULT,
            },
            AdjustmentKind::Contrast => Bounds {
                min: contrast_bounds::MIN,
                max: contrast_bounds::MAX,
                default: contrast_bounds::DEFAULT,
            },
            AdjustmentKind::Saturation => Bounds {
                min: saturation_bounds::MIN,
                max: saturation_bounds::MAX,
                default: saturation_bounds::DEFAULT,
            },
            AdjustmentKind::Sharpness => Bounds {
                min: sharpness_bounds::MIN,
                max: sharpness_bounds::MAX,
                default: sharpness_bounds::DEFAULT,
            },
            AdjustmentKind::Blur => Bounds {
                min: blur_bounds::MIN,
                max: blur_bounds::MAX,
                default: blur_bounds::DEFAULT,
            },
        }
    }

    /// Returns the i18n key of the control label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            AdjustmentKind::Brightness => "controls-brightness-label",
            AdjustmentKind::Contrast => "controls-contrast-label",
            AdjustmentKind::Saturation => "controls-saturation-label",
            AdjustmentKind::Sharpness => "controls-sharpness-label",
            AdjustmentKind::Blur => "controls-blur-label",
        }
    }

    /// Formats a value the way the control panel displays it.
    ///
    /// Every control, sharpness and blur included, shows its position with
    /// a percent sign.
    #[must_use]
    pub fn format_value(self, value: u16) -> String {
        let value = self.bounds().clamp(value);
        format!("{value}%")
    }
}

// =============================================================================
// Tests
// =============================================================================
