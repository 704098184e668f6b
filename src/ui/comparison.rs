// SPDX-License-Identifier: MPL-2.0
//! Before/after comparison view with a divider slider.

use crate::i18n::fluent::I18n;
use crate::media::DividerPosition;
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{container, image, slider, text, Column, Row, Space};
use iced::{ContentFit, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    DividerMoved(f32),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Composed before/after frame; `None` if the upload cannot be previewed.
    pub frame: Option<&'a image::Handle>,
    pub divider: DividerPosition,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let Some(frame) = ctx.frame else {
        return container(text(ctx.i18n.tr("comparison-unavailable")).size(typography::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    };

    let labels = Row::new()
        .push(text(ctx.i18n.tr("comparison-before")).size(typography::CAPTION))
        .push(Space::new().width(Length::Fill))
        .push(text(ctx.i18n.tr("comparison-after")).size(typography::CAPTION));

    Column::new()
        .spacing(spacing::XS)
        .push(
            image(frame.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(labels)
        .push(slider(0.0..=1.0, ctx.divider.value(), Message::DividerMoved).step(0.01f32))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
