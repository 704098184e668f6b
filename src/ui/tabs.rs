// SPDX-License-Identifier: MPL-2.0
//! Upload / Enhance tab bar.

use crate::i18n::fluent::I18n;
use crate::session::Screen;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::button as button_styles;
use iced::widget::{button, text, Row};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Select(Screen),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    /// The Enhance tab is disabled until an image is loaded.
    pub enhance_enabled: bool,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let tab = |screen: Screen, key: &str, enabled: bool| {
        button(text(ctx.i18n.tr(key)).size(typography::BODY_LG))
            .padding(spacing::XS)
            .height(sizing::BUTTON_HEIGHT)
            .width(Length::Fill)
            .style(button_styles::tab(ctx.screen == screen))
            .on_press_maybe(enabled.then_some(Message::Select(screen)))
    };

    Row::new()
        .spacing(spacing::XS)
        .push(tab(Screen::Upload, "tab-upload", true))
        .push(tab(Screen::Enhance, "tab-enhance", ctx.enhance_enabled))
        .width(Length::Fill)
        .into()
}
