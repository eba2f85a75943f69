use iced::widget::{column, container, row, text, Column, Image};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use std::sync::Arc;

mod color;
mod config;
mod sprite;
mod state;
mod ui;

use config::Config;
use sprite::LoadError;
use state::manifest::{self, Manifest, ManifestError};
use state::{AppState, Effect};

/// Main application
struct SpriteTinter {
    config: Config,
    /// `None` until the manifest has loaded; stays `None` if it never does
    state: Option<AppState>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The manifest read finished
    ManifestLoaded(Result<Manifest, Arc<ManifestError>>),
    /// User picked a category
    CategorySelected(String),
    /// User picked a subcategory
    SubcategorySelected(String),
    /// User clicked the thumbnail at this index
    ThumbnailClicked(usize),
    HueChanged(u16),
    SaturationChanged(u8),
    ValueChanged(u8),
    /// Background decode of load request `id` completed
    SpriteLoaded(u64, Result<image::RgbaImage, Arc<LoadError>>),
}

impl SpriteTinter {
    /// Create the application and start reading the manifest
    fn new(config: Config) -> (Self, Task<Message>) {
        let manifest_path = config.manifest_path();
        log::info!("🎨 Sprite Tinter starting, manifest: {}", manifest_path.display());

        (
            SpriteTinter { config, state: None },
            Task::perform(manifest::load_manifest(manifest_path), |result| {
                Message::ManifestLoaded(result.map_err(Arc::new))
            }),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let effect = self.apply(message);
        match &self.state {
            Some(state) => spawn(state, effect),
            None => Task::none(),
        }
    }

    /// Route a message to the state and return the async work it asks for
    fn apply(&mut self, message: Message) -> Effect {
        if let Message::ManifestLoaded(result) = message {
            return match result {
                Ok(manifest) => {
                    let (state, effect) = AppState::new(manifest, self.config.clone());
                    self.state = Some(state);
                    effect
                }
                Err(error) => {
                    // No retry: the app stays inert
                    log::error!("Error loading sprites manifest: {}", error);
                    Effect::None
                }
            };
        }

        // Nothing is wired until the manifest is in
        let Some(state) = self.state.as_mut() else {
            return Effect::None;
        };

        match message {
            Message::ManifestLoaded(_) => Effect::None,
            Message::CategorySelected(category) => state.select_category(&category),
            Message::SubcategorySelected(subcategory) => state.select_subcategory(&subcategory),
            Message::ThumbnailClicked(index) => state.click_thumbnail(index),
            Message::HueChanged(hue) => {
                state.set_hue(hue);
                Effect::None
            }
            Message::SaturationChanged(saturation) => {
                state.set_saturation(saturation);
                Effect::None
            }
            Message::ValueChanged(value) => {
                state.set_value(value);
                Effect::None
            }
            Message::SpriteLoaded(id, result) => {
                state.sprite_loaded(id, result);
                Effect::None
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let Some(state) = &self.state else {
            return container(text("Waiting for sprites.json...").size(16))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let surface = state.surface();
        let canvas = container(
            Image::new(surface.handle().clone())
                .width(Length::Fixed(surface.width() as f32))
                .height(Length::Fixed(surface.height() as f32)),
        )
        .padding(8)
        .style(container::bordered_box);

        let content: Column<Message> = column![
            text("Sprite Tinter").size(32),
            ui::controls::category_bar(state),
            ui::controls::status_line(state),
            ui::thumbnails::thumbnail_grid(state),
            row![canvas, ui::controls::tint_sliders(state)]
                .spacing(30)
                .align_y(Alignment::Center),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Turn an [`Effect`] into async work on the runtime
fn spawn(state: &AppState, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::Load(request) => {
            let path = state.resolve(&request.path);
            Task::perform(sprite::load_sprite(request.id, path), |(id, result)| {
                Message::SpriteLoaded(id, result.map_err(Arc::new))
            })
        }
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let (width, height) = config.window_size;

    iced::application("Sprite Tinter", SpriteTinter::update, SpriteTinter::view)
        .theme(SpriteTinter::theme)
        .window_size(Size::new(width, height))
        .centered()
        .run_with(move || SpriteTinter::new(config))
}
