use egui::{Color32, Pos2};
use std::sync::Arc;
use uuid::Uuid;

use crate::palette::PaletteIndex;
use crate::style::{StyleLimits, StyleState};

/// Style captured from the [`StyleState`] when a point is appended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color_index: PaletteIndex,
    pub thickness: f32,
    /// `None` for variants without an opacity control (drawn fully opaque).
    pub opacity: Option<f32>,
}

impl StrokeStyle {
    pub fn snapshot(style: &StyleState, limits: &StyleLimits) -> Self {
        Self {
            color_index: style.color_index(),
            thickness: style.thickness(),
            opacity: style.stroke_opacity(limits),
        }
    }

    /// Palette color with the opacity folded into its alpha.
    pub fn paint_color(&self) -> Color32 {
        self.color_index.color().gamma_multiply(self.opacity.unwrap_or(1.0))
    }
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: Uuid,
    /// Canvas-local coordinates.
    points: Vec<Pos2>,
    style: StrokeStyle,
}

// Mutable stroke for editing
#[derive(Debug, Clone)]
pub struct MutableStroke {
    id: Uuid,
    points: Vec<Pos2>,
    style: StrokeStyle,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(style: StrokeStyle, points: Vec<Pos2>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style,
        }
    }

    pub fn new_ref(style: StrokeStyle, points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Self::new(style, points))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn thickness(&self) -> f32 {
        self.style.thickness
    }

    /// Fewer than two points draw nothing.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }
}

impl MutableStroke {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style,
        }
    }

    /// Append a point and re-stamp the stroke with `style`.
    pub fn add_point(&mut self, point: Pos2, style: StrokeStyle) {
        self.points.push(point);
        self.style = style;
    }

    // Freeze into an immutable stroke, keeping the same identity
    pub fn finish(self) -> StrokeRef {
        Arc::new(Stroke {
            id: self.id,
            points: self.points,
            style: self.style,
        })
    }

    // Copy for preview rendering while the gesture continues
    pub fn to_stroke(&self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points.clone(),
            style: self.style,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}
