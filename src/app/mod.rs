// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the [`Studio`] controller to the iced runtime and
//! translates messages into side effects like file dialogs, uploads and
//! background renders.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::i18n::fluent::I18n;
use crate::session::Studio;
use crate::ui::enhance::Notice;
use config::Config;
use iced::widget::image;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root iced application state.
pub struct App {
    pub i18n: I18n,
    studio: Studio,
    /// Composed before/after frame, rebuilt when the render or divider changes.
    frame: Option<image::Handle>,
    /// Outcome of the last download attempt.
    notice: Option<Notice>,
    /// i18n key of a config load problem, shown once at the top.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.studio.screen())
            .field("has_image", &self.studio.has_image())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: f32 = 720.0;
pub const WINDOW_DEFAULT_WIDTH: f32 = 1080.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;
pub const MIN_WINDOW_WIDTH: f32 = 760.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; the flags are consumed on first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            studio: Studio::default(),
            frame: None,
            notice: None,
            config_warning: None,
        }
    }
}

impl App {
    /// Loads the configuration and, if a path was passed, starts uploading it.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        Self::with_config(flags, &config, config_warning)
    }

    fn with_config(
        flags: Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let mut studio = Studio::new(config.studio_options());

        tracing::info!(
            locale = %i18n.current_locale(),
            max_upload_bytes = studio.max_upload_bytes(),
            "application started"
        );

        let task = match flags.file_path {
            Some(argument) => update::load_startup_image(&mut studio, argument),
            None => Task::none(),
        };

        let app = App {
            i18n,
            studio,
            frame: None,
            notice: None,
            config_warning,
        };
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self
            .studio
            .session()
            .and_then(|session| session.source().file_name())
        {
            Some(file_name) => format!("{file_name} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.studio.is_downloading()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            studio: &mut self.studio,
            frame: &mut self.frame,
            notice: &mut self.notice,
        };

        match message {
            Message::Tabs(message) => update::handle_tabs_message(&mut ctx, message),
            Message::Uploader(message) => update::handle_uploader_message(&mut ctx, message),
            Message::Enhance(message) => update::handle_enhance_message(&mut ctx, message),
            Message::OpenFileDialogResult(path) => update::handle_file_selected(&mut ctx, path),
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::UploadLoaded { generation, result } => {
                update::handle_upload_loaded(&mut ctx, generation, result)
            }
            Message::RenderCompleted { generation, result } => {
                update::handle_render_completed(&mut ctx, generation, result)
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            studio: &self.studio,
            frame: self.frame.as_ref(),
            notice: self.notice.as_ref(),
            config_warning: self.config_warning.as_deref(),
        })
    }
}
