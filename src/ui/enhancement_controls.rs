// SPDX-License-Identifier: MPL-2.0
//! Adjustment panel: one labelled slider per [`AdjustmentKind`] plus Reset.

use crate::domain::{AdjustmentKind, AdjustmentSettings};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::styles::button as button_styles;
use iced::widget::{button, container, slider, text, Column, Row, Space};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Changed(AdjustmentKind, u16),
    Reset,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub settings: &'a AdjustmentSettings,
}

fn control<'a>(i18n: &I18n, kind: AdjustmentKind, value: u16) -> Element<'a, Message> {
    let bounds = kind.bounds();

    let header = Row::new()
        .push(text(i18n.tr(kind.label_key())).size(typography::BODY_SM))
        .push(Space::new().width(Length::Fill))
        .push(text(kind.format_value(value)).size(typography::BODY_SM));

    Column::new()
        .spacing(spacing::XXS)
        .push(header)
        .push(
            slider(bounds.min..=bounds.max, value, move |value| {
                Message::Changed(kind, value)
            })
            .step(1u16),
        )
        .into()
}

pub fn panel<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let sliders = AdjustmentKind::ALL
        .into_iter()
        .fold(Column::new().spacing(spacing::SM), |column, kind| {
            column.push(control(ctx.i18n, kind, ctx.settings.get(kind)))
        });

    let reset_btn = button(text(ctx.i18n.tr("controls-reset-button")).size(typography::BODY))
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(button_styles::secondary)
        .on_press_maybe((!ctx.settings.is_default()).then_some(Message::Reset));

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text(ctx.i18n.tr("controls-title")).size(typography::TITLE_SM))
            .push(sliders)
            .push(reset_btn),
    )
    .padding(spacing::SM)
    .width(sizing::CONTROLS_WIDTH)
    .style(styles::container::panel)
    .into()
}
