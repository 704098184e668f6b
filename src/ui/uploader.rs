// SPDX-License-Identifier: MPL-2.0
//! Upload page: drop hint, browse button and inline error.

use crate::error::UploadError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::styles::button as button_styles;
use iced::alignment::Horizontal;
use iced::widget::{button, container, text, Column};
use iced::{Element, Length};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Browse,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub error: Option<&'a UploadError>,
    pub max_upload_bytes: u64,
}

/// Localized text for an upload error.
pub fn error_message(i18n: &I18n, error: &UploadError) -> String {
    match error {
        UploadError::FileTooLarge { limit, .. } => i18n.tr_with_args(
            error.i18n_key(),
            &[("limit", &(limit / MIB).to_string())],
        ),
        UploadError::FileReadFailed(_) => i18n.tr(error.i18n_key()),
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let limit_mb = (ctx.max_upload_bytes / MIB).to_string();

    let browse = button(text(ctx.i18n.tr("upload-browse-button")).size(typography::BODY_LG))
        .padding(spacing::SM)
        .style(button_styles::primary)
        .on_press(Message::Browse);

    let drop_zone = container(
        Column::new()
            .spacing(spacing::SM)
            .align_x(Horizontal::Center)
            .push(text(ctx.i18n.tr("upload-drop-hint")).size(typography::BODY_LG))
            .push(browse)
            .push(
                text(ctx.i18n.tr_with_args("upload-accepted-formats", &[("limit", &limit_mb)]))
                    .size(typography::CAPTION),
            ),
    )
    .center_x(Length::Fill)
    .center_y(sizing::DROP_ZONE_HEIGHT)
    .style(styles::container::drop_zone);

    let mut page = Column::new()
        .spacing(spacing::MD)
        .push(text(ctx.i18n.tr("upload-title")).size(typography::TITLE_MD))
        .push(drop_zone);

    if let Some(error) = ctx.error {
        page = page.push(
            container(text(error_message(ctx.i18n, error)).size(typography::BODY))
                .padding(spacing::XS)
                .width(Length::Fill)
                .style(styles::container::banner(palette::ERROR_500)),
        );
    }

    container(page)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}
