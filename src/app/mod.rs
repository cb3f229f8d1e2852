// SPDX-License-Identifier: MPL-2.0
//! Application root state: one Resize button and one image view.
//!
//! Pressing Resize runs [`media::load_and_resize`] for the installed image
//! and swaps the result into the view. The displayed image is only replaced
//! once the new one has loaded, so a failed load leaves the old one visible.

mod message;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::assets;
use crate::config::{self, Config, WINDOW_DEFAULT_HEIGHT, WINDOW_DEFAULT_WIDTH};
use crate::media::{self, Dimensions, ImageData};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    /// Image the Resize button loads.
    image_path: Option<PathBuf>,
    /// Sampling box for the decode.
    target: Dimensions,
    /// Fixed output size; the window size is used when absent.
    screen_override: Option<Dimensions>,
    /// Last known window size in logical pixels.
    window_size: Dimensions,
    /// Image currently shown.
    image: Option<ImageData>,
    /// Set while a load task is running.
    loading: bool,
    /// Message from the last failed load.
    error: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("image_path", &self.image_path)
            .field("has_image", &self.image.is_some())
            .field("loading", &self.loading)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires Fn for boot; flags are consumed once.
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
            image_path: None,
            target: config::LoaderConfig::default().target(),
            screen_override: None,
            window_size: Dimensions::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            image: None,
            loading: false,
            error: None,
        }
    }
}

fn load_config(flags: &Flags) -> Config {
    let loaded = match &flags.config_path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Could not read settings, using defaults");
        Config::default()
    })
}

impl App {
    /// Reads settings, picks the image to show and applies flag overrides.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = load_config(&flags);

        // An image named on the command line is shown in place; only the
        // configured asset goes through the data dir.
        let image_path = flags.image_path.clone().or_else(|| {
            let data_dir = flags.data_dir.clone().or_else(assets::default_data_dir);
            assets::resolve_image_path(
                config.asset.source.as_deref(),
                data_dir.as_deref(),
                &config.asset.file_name,
            )
        });
        if image_path.is_none() {
            tracing::warn!("No image source configured");
        }

        let app = App {
            image_path,
            target: flags.target.unwrap_or_else(|| config.loader.target()),
            screen_override: flags.screen.or_else(|| config.display.screen_override()),
            ..Self::default()
        };
        tracing::debug!(?app, "Application initialised");

        (app, Task::none())
    }

    /// Size the loaded image is stretched to.
    ///
    /// Without an override this is the window's logical size, not its
    /// physical one: on a display with a scale factor above 1 the bitmap
    /// is built smaller than the device pixel grid and iced upscales it
    /// when drawing. Set `[display]` or `--screen` to the physical size to
    /// get a pixel-exact result.
    fn screen_size(&self) -> Dimensions {
        self.screen_override.unwrap_or(self.window_size)
    }

    fn title(&self) -> String {
        let app_name = config::APP_NAME.to_string();
        let file_name = self
            .image_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str());

        match file_name {
            Some(name) if self.image.is_some() => format!("{name} - {app_name}"),
            _ => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ResizePressed => {
                if self.loading {
                    tracing::debug!("Load already in flight, ignoring press");
                    return Task::none();
                }
                let Some(path) = self.image_path.clone() else {
                    self.error = Some("No image to load".to_string());
                    return Task::none();
                };

                self.loading = true;
                let target = self.target;
                let screen = self.screen_size();
                Task::perform(
                    async move {
                        media::load_and_resize(&path, target, screen).map(ImageData::from_bitmap)
                    },
                    Message::ImageLoaded,
                )
            }
            Message::ImageLoaded(Ok(image)) => {
                self.loading = false;
                self.error = None;
                // The previous image is dropped here, after its replacement exists.
                self.image = Some(image);
                Task::none()
            }
            Message::ImageLoaded(Err(err)) => {
                self.loading = false;
                tracing::warn!(error = %err, "Image load failed");
                self.error = Some(err.to_string());
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = Dimensions::new(
                    size.width.round().max(1.0) as u32,
                    size.height.round().max(1.0) as u32,
                );
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            image: self.image.as_ref(),
            error: self.error.as_deref(),
            loading: self.loading,
            has_source: self.image_path.is_some(),
        })
    }
}
