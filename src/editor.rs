use egui::Rect;
use image::RgbaImage;
use log::{debug, info};

use crate::capture::{self, CapturedImage, Scene};
use crate::command::Command;
use crate::document::Document;
use crate::error::CaptureError;
use crate::input::InputEvent;
use crate::stroke::{Stroke, StrokeStyle};
use crate::style::{StyleLimits, StyleState, Variant};
use crate::tools::{DrawStrokeTool, Tool};

/// Owns all drawing state. The UI reads it through shared borrows and
/// changes it only through [`Editor::execute`] and [`Editor::handle_input`].
#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    style: StyleState,
    variant: Variant,
    tool: DrawStrokeTool,
    captured: Option<CapturedImage>,
}

impl Editor {
    pub fn new(variant: Variant, mut style: StyleState) -> Self {
        style.clamp(&variant.limits());
        Self {
            document: Document::new(),
            style,
            variant,
            tool: DrawStrokeTool::new(),
            captured: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn limits(&self) -> StyleLimits {
        self.variant.limits()
    }

    pub fn tool(&self) -> &DrawStrokeTool {
        &self.tool
    }

    /// The stroke being drawn right now, if a gesture is in progress
    pub fn preview(&self) -> Option<Stroke> {
        self.tool.preview()
    }

    /// Style a point appended now would be stamped with
    pub fn current_stroke_style(&self) -> StrokeStyle {
        StrokeStyle::snapshot(&self.style, &self.limits())
    }

    pub fn captured(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    pub fn execute(&mut self, command: Command) {
        let limits = self.limits();
        match command {
            Command::AddStroke(stroke) => {
                debug!("Adding stroke {} ({} points)", stroke.id(), stroke.points().len());
                self.document.add_stroke(stroke);
            }
            Command::Undo => match self.document.remove_last_stroke() {
                Some(stroke) => info!("Undo: removed stroke {}", stroke.id()),
                None => debug!("Undo: nothing to remove"),
            },
            Command::CycleColor => {
                self.style.cycle_color();
                info!("Color: {}", self.style.color_index().name());
            }
            Command::SetThickness(thickness) => self.style.set_thickness(thickness, &limits),
            Command::StepThickness(steps) => self.style.step_thickness(steps, &limits),
            Command::SetOpacity(opacity) => self.style.set_opacity(opacity, &limits),
            Command::SetVariant(variant) => {
                if variant != self.variant {
                    info!("Variant: {}", variant.label());
                    self.tool.deactivate();
                    self.variant = variant;
                    self.style.clamp(&variant.limits());
                }
            }
        }
    }

    /// Route one input event to the active tool and apply what it produces.
    pub fn handle_input(&mut self, event: &InputEvent) {
        let style = self.current_stroke_style();
        let command = match event {
            InputEvent::PointerDown { location } => {
                self.tool.on_pointer_down(location.canvas_position, style)
            }
            InputEvent::PointerMove { location } => {
                self.tool.on_pointer_move(location.canvas_position, style)
            }
            InputEvent::PointerUp { .. } => self.tool.on_pointer_up(style),
            event if event.is_undo_shortcut() => Some(Command::Undo),
            InputEvent::KeyDown { .. } => None,
        };
        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Rasterize the canvas region into a bitmap and keep it for presentation.
    ///
    /// `canvas_rect` is the rectangle measured during the previous layout pass.
    pub fn capture(
        &mut self,
        canvas_rect: Option<Rect>,
        backdrop: &RgbaImage,
        pixels_per_point: f32,
    ) -> Result<&CapturedImage, CaptureError> {
        if !self.variant.can_capture() {
            return Err(CaptureError::NotAvailable(self.variant.label()));
        }
        let canvas_rect = canvas_rect.ok_or(CaptureError::CanvasNotMeasured)?;
        let scene = Scene {
            canvas_rect,
            backdrop,
            strokes: self.document.strokes(),
        };
        let captured = capture::capture(canvas_rect, &scene, pixels_per_point)?;
        Ok(&*self.captured.insert(captured))
    }

    /// Drop the captured image once its display is closed.
    pub fn dismiss_capture(&mut self) {
        self.captured = None;
    }
}
