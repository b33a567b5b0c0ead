use egui::Pos2;

use crate::command::Command;
use crate::stroke::{Stroke, StrokeStyle};

/// Tool trait defines the interface for canvas tools driven by pointer gestures.
///
/// Positions are canvas-local. `style` is the style in effect when the event arrived.
pub trait Tool {
    /// Called when the tool is deselected. Drops any unfinished work.
    fn deactivate(&mut self);

    /// Handle pointer press on the canvas.
    /// Return a Command to **begin** an action if applicable, or None.
    fn on_pointer_down(&mut self, pos: Pos2, style: StrokeStyle) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down.
    fn on_pointer_move(&mut self, pos: Pos2, style: StrokeStyle) -> Option<Command>;

    /// Handle pointer release.
    /// Return a Command to **finalize** an action if applicable.
    fn on_pointer_up(&mut self, style: StrokeStyle) -> Option<Command>;

    /// Work in progress to draw on top of the document, if any
    fn preview(&self) -> Option<Stroke>;

    /// Whether a gesture is currently being handled
    fn is_active(&self) -> bool;
}

mod draw_stroke_tool;
pub use draw_stroke_tool::DrawStrokeTool;
