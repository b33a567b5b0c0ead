use egui::Rect;
use image::RgbaImage;
use log::{error, info};

use crate::assets;
use crate::command::Command;
use crate::config::AppConfig;
use crate::deferred::DeferredQueue;
use crate::editor::Editor;
use crate::flip::FlipCard;
use crate::input::InputHandler;
use crate::panels;
use crate::renderer::Renderer;
use crate::style::{StyleState, Variant};

/// Settings remembered between runs. Drawings are not persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedSettings {
    pub variant: Variant,
    pub style: StyleState,
}

/// Layout-derived state. Written only through the deferred queue, or by
/// explicit user actions outside of layout.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Screen rectangle of the canvas from the last layout pass
    pub canvas_rect: Option<Rect>,
    /// Open while the captured image is being presented
    pub card: Option<FlipCard>,
    /// Bumped each time a card is opened, so its animation starts fresh
    pub presentations: u64,
}

pub struct PaintApp {
    pub(crate) config: AppConfig,
    pub(crate) editor: Editor,
    pub(crate) renderer: Renderer,
    pub(crate) backdrop: RgbaImage,
    pub(crate) input: InputHandler,
    pub(crate) view: ViewState,
    pub(crate) deferred: DeferredQueue<ViewState>,
    /// Last error shown to the user
    pub(crate) status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::from_env();
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<PersistedSettings>(storage, eframe::APP_KEY))
            .unwrap_or_else(|| PersistedSettings {
                variant: config.variant,
                style: StyleState::default(),
            });
        Self::with_config(&cc.egui_ctx, config, settings)
    }

    pub fn with_config(ctx: &egui::Context, config: AppConfig, settings: PersistedSettings) -> Self {
        let backdrop = assets::load_or(config.backdrop_path.as_deref(), assets::placeholder_backdrop);
        let card_back = assets::load_or(config.card_back_path.as_deref(), assets::placeholder_card_back);
        let renderer = Renderer::new(ctx, &backdrop, &card_back);
        info!("Starting in {} variant", settings.variant.label());

        Self {
            config,
            editor: Editor::new(settings.variant, settings.style),
            renderer,
            backdrop,
            input: InputHandler::new(Rect::NOTHING),
            view: ViewState::default(),
            deferred: DeferredQueue::new(),
            status: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn settings(&self) -> PersistedSettings {
        PersistedSettings {
            variant: self.editor.variant(),
            style: self.editor.style().clone(),
        }
    }

    /// Apply layout writes queued during the previous frame.
    pub fn begin_frame(&mut self) {
        self.deferred.flush(&mut self.view);
        // Gestures of this frame are hit-tested against the latest layout
        if let Some(rect) = self.view.canvas_rect {
            self.input.set_canvas_rect(rect);
        }
    }

    /// Run a UI command against the editor.
    pub fn execute(&mut self, command: Command) {
        // A capture error belongs to the variant it was raised in
        if matches!(command, Command::SetVariant(_)) {
            self.status = None;
        }
        self.editor.execute(command);
    }

    /// Capture the canvas and open the flip card on success.
    pub fn present(&mut self, ctx: &egui::Context) {
        let pixels_per_point = ctx.pixels_per_point();
        match self
            .editor
            .capture(self.view.canvas_rect, &self.backdrop, pixels_per_point)
        {
            Ok(captured) => {
                self.renderer.set_captured(ctx, captured);
                self.view.card = Some(FlipCard::new());
                self.view.presentations += 1;
                self.status = None;
            }
            Err(err) => {
                error!("Present failed: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Close the flip card and release the captured image.
    pub fn dismiss(&mut self) {
        self.view.card = None;
        self.editor.dismiss_capture();
        self.renderer.clear_captured();
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.begin_frame();

        if self.view.card.is_some() {
            panels::present_panel(self, ctx);
        } else {
            panels::controls_panel(self, ctx);
            panels::canvas_panel(self, ctx);
        }
    }
}
