// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::session::{Screen, Studio};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::enhance::{self, Notice};
use crate::ui::{styles, tabs, uploader};
use iced::widget::{container, image, text, Column, Container};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub studio: &'a Studio,
    pub frame: Option<&'a image::Handle>,
    pub notice: Option<&'a Notice>,
    pub config_warning: Option<&'a str>,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let studio = ctx.studio;

    let tabs_view = tabs::view(tabs::ViewContext {
        i18n: ctx.i18n,
        screen: studio.screen(),
        enhance_enabled: studio.has_image(),
    })
    .map(Message::Tabs);

    let current_view: Element<'_, Message> = match (studio.screen(), studio.session()) {
        (Screen::Enhance, Some(session)) => enhance::view(enhance::ViewContext {
            i18n: ctx.i18n,
            session,
            frame: ctx.frame,
            enhancement_applied: studio.enhancement_applied(),
            is_downloading: studio.is_downloading(),
            notice: ctx.notice,
        })
        .map(Message::Enhance),
        _ => uploader::view(uploader::ViewContext {
            i18n: ctx.i18n,
            error: studio.upload_error(),
            max_upload_bytes: studio.max_upload_bytes(),
        })
        .map(Message::Uploader),
    };

    let mut column = Column::new().spacing(spacing::MD).push(tabs_view);

    if let Some(key) = ctx.config_warning {
        column = column.push(
            container(text(ctx.i18n.tr(key)).size(typography::BODY_SM))
                .padding(spacing::XS)
                .width(Length::Fill)
                .style(styles::container::banner(palette::WARNING_500)),
        );
    }

    column = column.push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    Container::new(column.width(Length::Fill).height(Length::Fill))
        .padding(spacing::MD)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
