use std::ops::RangeInclusive;

use crate::palette::PaletteIndex;

/// Which control set the canvas is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    /// Thickness slider, opacity slider, no capture.
    #[default]
    Overlay,
    /// Thickness stepper, no opacity, capture into a flip card.
    FlipCard,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overlay => "Overlay",
            Self::FlipCard => "Flip card",
        }
    }

    pub fn limits(self) -> StyleLimits {
        match self {
            Self::Overlay => StyleLimits {
                thickness: 1.0..=50.0,
                opacity: Some(0.0..=1.0),
            },
            Self::FlipCard => StyleLimits {
                thickness: 1.0..=30.0,
                opacity: None,
            },
        }
    }

    pub fn can_capture(self) -> bool {
        matches!(self, Self::FlipCard)
    }
}

/// Value ranges accepted by the style controls.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleLimits {
    pub thickness: RangeInclusive<f32>,
    /// `None` when the variant has no opacity control.
    pub opacity: Option<RangeInclusive<f32>>,
}

/// The style applied to the stroke currently being drawn.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleState {
    color_index: PaletteIndex,
    thickness: f32,
    opacity: f32,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            color_index: PaletteIndex::default(),
            thickness: 5.0,
            opacity: 0.5,
        }
    }
}

impl StyleState {
    pub fn color_index(&self) -> PaletteIndex {
        self.color_index
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Advance to the next palette color.
    pub fn cycle_color(&mut self) {
        self.color_index = self.color_index.next();
    }

    pub fn set_thickness(&mut self, thickness: f32, limits: &StyleLimits) {
        self.thickness = clamp_to(thickness, &limits.thickness);
    }

    /// Step the thickness by whole units, as a stepper control does.
    pub fn step_thickness(&mut self, steps: i32, limits: &StyleLimits) {
        self.set_thickness(self.thickness.round() + steps as f32, limits);
    }

    /// Ignored when the variant has no opacity control.
    pub fn set_opacity(&mut self, opacity: f32, limits: &StyleLimits) {
        if let Some(range) = &limits.opacity {
            self.opacity = clamp_to(opacity, range);
        }
    }

    /// Pull every value back into `limits`, e.g. after a variant switch.
    pub fn clamp(&mut self, limits: &StyleLimits) {
        self.thickness = clamp_to(self.thickness, &limits.thickness);
        if let Some(range) = &limits.opacity {
            self.opacity = clamp_to(self.opacity, range);
        }
    }

    /// Opacity to stamp onto a stroke, `None` when the variant has none.
    pub fn stroke_opacity(&self, limits: &StyleLimits) -> Option<f32> {
        limits.opacity.as_ref().map(|_| self.opacity)
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thickness_clamped_per_variant() {
        let mut style = StyleState::default();
        let overlay = Variant::Overlay.limits();
        let card = Variant::FlipCard.limits();

        style.set_thickness(0.0, &overlay);
        assert_eq!(style.thickness(), 1.0);
        style.set_thickness(80.0, &overlay);
        assert_eq!(style.thickness(), 50.0);
        style.set_thickness(80.0, &card);
        assert_eq!(style.thickness(), 30.0);
    }

    #[test]
    fn test_opacity_clamped_and_ignored_without_control() {
        let mut style = StyleState::default();
        let overlay = Variant::Overlay.limits();

        style.set_opacity(1.5, &overlay);
        assert_eq!(style.opacity(), 1.0);
        style.set_opacity(-0.2, &overlay);
        assert_eq!(style.opacity(), 0.0);

        style.set_opacity(0.7, &Variant::FlipCard.limits());
        assert_eq!(style.opacity(), 0.0);
        assert_eq!(style.stroke_opacity(&Variant::FlipCard.limits()), None);
        assert_eq!(style.stroke_opacity(&overlay), Some(0.0));
    }

    #[test]
    fn test_stepper_stays_in_range() {
        let mut style = StyleState::default();
        let card = Variant::FlipCard.limits();

        style.step_thickness(1, &card);
        assert_eq!(style.thickness(), 6.0);
        style.step_thickness(-100, &card);
        assert_eq!(style.thickness(), 1.0);
        style.step_thickness(100, &card);
        assert_eq!(style.thickness(), 30.0);
    }

    #[test]
    fn test_clamp_after_variant_switch() {
        let mut style = StyleState::default();
        style.set_thickness(45.0, &Variant::Overlay.limits());
        style.clamp(&Variant::FlipCard.limits());
        assert_eq!(style.thickness(), 30.0);
    }
}
