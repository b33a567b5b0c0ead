use crate::stroke::StrokeRef;
use crate::style::Variant;

/// Actions the UI asks the editor to perform.
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a completed stroke to the document
    AddStroke(StrokeRef),
    /// Remove the most recent stroke, if any
    Undo,
    /// Advance the palette index
    CycleColor,
    SetThickness(f32),
    /// Move thickness by whole steps (stepper control)
    StepThickness(i32),
    SetOpacity(f32),
    SetVariant(Variant),
}

impl Command {
    /// Short label for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddStroke(_) => "Add Stroke",
            Command::Undo => "Undo",
            Command::CycleColor => "Cycle Color",
            Command::SetThickness(_) => "Set Thickness",
            Command::StepThickness(_) => "Step Thickness",
            Command::SetOpacity(_) => "Set Opacity",
            Command::SetVariant(_) => "Set Variant",
        }
    }
}
