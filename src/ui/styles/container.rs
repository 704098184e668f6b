// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Panel surface derived from the theme background, slightly lifted so it
/// reads as a separate card in light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;
    let luminance = base.r + base.g + base.b;
    let shift = if luminance < 1.5 { 0.10 } else { -0.06 };

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            (base.r + shift).clamp(0.0, 1.0),
            (base.g + shift).clamp(0.0, 1.0),
            (base.b + shift).clamp(0.0, 1.0),
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            width: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dashed-looking drop target on the upload page.
pub fn drop_zone(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::PRIMARY_500
        })),
        border: Border {
            color: palette::PRIMARY_500,
            width: 2.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Inline message banner tinted with `accent`.
pub fn banner(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..accent
        })),
        text_color: Some(accent),
        border: Border {
            color: accent,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_uses_accent_for_text_and_border() {
        let style = banner(palette::ERROR_500)(&Theme::Dark);
        assert_eq!(style.text_color, Some(palette::ERROR_500));
        assert_eq!(style.border.color, palette::ERROR_500);
    }

    #[test]
    fn panel_is_translucent() {
        let style = panel(&Theme::Light);
        match style.background {
            Some(Background::Color(color)) => assert_eq!(color.a, opacity::SURFACE),
            other => panic!("expected color background, got {other:?}"),
        }
    }
}
