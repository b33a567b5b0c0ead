use egui::Pos2;
use log::debug;

use crate::command::Command;
use crate::stroke::{MutableStroke, Stroke, StrokeStyle};
use crate::tools::Tool;

/// Turns a drag gesture into one stroke.
#[derive(Debug, Default)]
pub struct DrawStrokeTool {
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<MutableStroke>,
}

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self { current_stroke: None }
    }

    /// Points of the in-progress stroke; empty between gestures.
    pub fn in_progress_points(&self) -> &[Pos2] {
        self.current_stroke
            .as_ref()
            .map(|stroke| stroke.points())
            .unwrap_or(&[])
    }

    fn append(&mut self, pos: Pos2, style: StrokeStyle) {
        self.current_stroke
            .get_or_insert_with(|| MutableStroke::new(style))
            .add_point(pos, style);
    }
}

impl Tool for DrawStrokeTool {
    fn deactivate(&mut self) {
        self.current_stroke = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, style: StrokeStyle) -> Option<Command> {
        // Start a new stroke at the cursor position
        self.current_stroke = Some(MutableStroke::new(style));
        self.append(pos, style);
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, style: StrokeStyle) -> Option<Command> {
        self.append(pos, style);
        None
    }

    fn on_pointer_up(&mut self, style: StrokeStyle) -> Option<Command> {
        // Gestures without any recorded point still end up in the history
        let stroke = self
            .current_stroke
            .take()
            .unwrap_or_else(|| MutableStroke::new(style))
            .finish();
        debug!("Stroke {} finished with {} points", stroke.id(), stroke.points().len());
        Some(Command::AddStroke(stroke))
    }

    fn preview(&self) -> Option<Stroke> {
        self.current_stroke.as_ref().map(MutableStroke::to_stroke)
    }

    fn is_active(&self) -> bool {
        self.current_stroke.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteIndex;

    fn style(color: usize, thickness: f32) -> StrokeStyle {
        StrokeStyle {
            color_index: PaletteIndex::new(color),
            thickness,
            opacity: Some(0.5),
        }
    }

    #[test]
    fn test_points_recorded_in_order() {
        let mut tool = DrawStrokeTool::new();
        let s = style(1, 5.0);
        tool.on_pointer_down(Pos2::new(0.0, 0.0), s);
        for i in 1..=4 {
            tool.on_pointer_move(Pos2::new(i as f32, 2.0 * i as f32), s);
        }
        assert_eq!(tool.in_progress_points().len(), 5);
        assert_eq!(tool.in_progress_points()[3], Pos2::new(3.0, 6.0));

        let Some(Command::AddStroke(stroke)) = tool.on_pointer_up(s) else {
            panic!("expected AddStroke");
        };
        assert_eq!(stroke.points().len(), 5);
        assert!(tool.in_progress_points().is_empty());
        assert!(!tool.is_active());
    }

    #[test]
    fn test_last_style_stamp_wins() {
        let mut tool = DrawStrokeTool::new();
        tool.on_pointer_down(Pos2::ZERO, style(1, 5.0));
        tool.on_pointer_move(Pos2::new(1.0, 1.0), style(3, 9.0));

        let Some(Command::AddStroke(stroke)) = tool.on_pointer_up(style(7, 2.0)) else {
            panic!("expected AddStroke");
        };
        assert_eq!(stroke.style(), style(3, 9.0));
    }

    #[test]
    fn test_gesture_without_points_still_yields_stroke() {
        let mut tool = DrawStrokeTool::new();
        let Some(Command::AddStroke(stroke)) = tool.on_pointer_up(style(2, 1.0)) else {
            panic!("expected AddStroke");
        };
        assert!(stroke.points().is_empty());
        assert!(stroke.is_degenerate());
    }

    #[test]
    fn test_move_without_down_starts_stroke() {
        let mut tool = DrawStrokeTool::new();
        tool.on_pointer_move(Pos2::new(4.0, 4.0), style(0, 1.0));
        assert!(tool.is_active());
        assert_eq!(tool.preview().map(|s| s.points().len()), Some(1));
    }
}
