// SPDX-License-Identifier: MPL-2.0
//! Enhance page: comparison view, actions and the adjustment panel.

use crate::error::DownloadError;
use crate::i18n::fluent::I18n;
use crate::session::EditorSession;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::styles::button as button_styles;
use crate::ui::{comparison, enhancement_controls};
use iced::widget::{button, container, image, text, Column, Row};
use iced::{Element, Length};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Comparison(comparison::Message),
    Controls(enhancement_controls::Message),
    Download,
    StartOver,
}

/// Outcome of the last download attempt, shown under the actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved(PathBuf),
    DownloadFailed(DownloadError),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a EditorSession,
    pub frame: Option<&'a image::Handle>,
    pub enhancement_applied: bool,
    pub is_downloading: bool,
    pub notice: Option<&'a Notice>,
}

fn notice_banner<'a>(i18n: &I18n, notice: &Notice) -> Element<'a, Message> {
    let (label, accent) = match notice {
        Notice::Saved(path) => (
            i18n.tr_with_args("download-saved", &[("path", &path.display().to_string())]),
            palette::SUCCESS_500,
        ),
        Notice::DownloadFailed(err) => (i18n.tr(err.i18n_key()), palette::ERROR_500),
    };
    container(text(label).size(typography::BODY_SM))
        .padding(spacing::XS)
        .width(Length::Fill)
        .style(styles::container::banner(accent))
        .into()
}

fn actions<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let has_render = ctx.session.rendered().is_some();
    let download_label = if ctx.is_downloading {
        ctx.i18n.tr("download-button-busy")
    } else {
        ctx.i18n.tr("download-button")
    };

    let download = button(text(download_label).size(typography::BODY))
        .padding(spacing::SM)
        .style(button_styles::primary)
        .on_press_maybe((has_render && !ctx.is_downloading).then_some(Message::Download));

    let start_over = button(text(ctx.i18n.tr("start-over-button")).size(typography::BODY))
        .padding(spacing::SM)
        .style(button_styles::secondary)
        .on_press(Message::StartOver);

    let mut row = Row::new().spacing(spacing::XS).push(download).push(start_over);
    if ctx.enhancement_applied {
        row = row.push(
            container(text(ctx.i18n.tr("enhancement-applied")).size(typography::BODY_SM))
                .padding(spacing::XS)
                .style(styles::container::banner(palette::SUCCESS_500)),
        );
    }
    row.into()
}

fn render_status<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    if ctx.session.render_error().is_some() {
        return Some(
            container(text(ctx.i18n.tr("render-error")).size(typography::BODY_SM))
                .padding(spacing::XS)
                .width(Length::Fill)
                .style(styles::container::banner(palette::WARNING_500))
                .into(),
        );
    }
    if ctx.session.rendered().is_none() && ctx.frame.is_some() {
        return Some(text(ctx.i18n.tr("render-pending")).size(typography::CAPTION).into());
    }
    None
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let comparison_view = comparison::view(comparison::ViewContext {
        i18n: ctx.i18n,
        frame: ctx.frame,
        divider: ctx.session.divider(),
    })
    .map(Message::Comparison);

    let mut main = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fill)
        .height(Length::Fill)
        .push(comparison_view)
        .push(actions(&ctx));

    if let Some(status) = render_status(&ctx) {
        main = main.push(status);
    }
    if let Some(notice) = ctx.notice {
        main = main.push(notice_banner(ctx.i18n, notice));
    }

    let controls = enhancement_controls::panel(enhancement_controls::ViewContext {
        i18n: ctx.i18n,
        settings: ctx.session.settings(),
    })
    .map(Message::Controls);

    Row::new()
        .spacing(spacing::MD)
        .push(main)
        .push(controls)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
