use egui::Color32;

/// Number of selectable colors.
pub const PALETTE_LEN: usize = 10;

/// Fixed, ordered list of stroke colors with their display names.
pub const PALETTE: [(Color32, &str); PALETTE_LEN] = [
    (Color32::BLACK, "black"),
    (Color32::from_rgb(0, 122, 255), "blue"),
    (Color32::from_rgb(142, 142, 147), "gray"),
    (Color32::from_rgb(52, 199, 89), "green"),
    (Color32::from_rgb(255, 149, 0), "orange"),
    (Color32::from_rgb(255, 45, 85), "pink"),
    (Color32::from_rgb(175, 82, 222), "purple"),
    (Color32::from_rgb(255, 59, 48), "red"),
    (Color32::from_rgb(255, 204, 0), "yellow"),
    (Color32::WHITE, "white"),
];

/// Index into [`PALETTE`]. Always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PaletteIndex(usize);

impl PaletteIndex {
    /// Wraps `index` into the palette range.
    pub fn new(index: usize) -> Self {
        Self(index % PALETTE_LEN)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// The index after this one, wrapping back to the first color.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % PALETTE_LEN)
    }

    pub fn color(self) -> Color32 {
        PALETTE[self.0].0
    }

    pub fn name(self) -> &'static str {
        PALETTE[self.0].1
    }
}

impl Default for PaletteIndex {
    // Blue
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<usize> for PaletteIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < PALETTE_LEN {
            Ok(Self(value))
        } else {
            Err(format!("palette index {} out of range (len {})", value, PALETTE_LEN))
        }
    }
}

impl From<PaletteIndex> for usize {
    fn from(index: PaletteIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_for_every_index() {
        for i in 0..PALETTE_LEN {
            assert_eq!(PaletteIndex::new(i).next().get(), (i + 1) % PALETTE_LEN);
        }
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for start in 0..PALETTE_LEN {
            let mut index = PaletteIndex::new(start);
            for _ in 0..PALETTE_LEN {
                index = index.next();
            }
            assert_eq!(index.get(), start);
        }
    }

    #[test]
    fn test_default_is_blue() {
        let index = PaletteIndex::default();
        assert_eq!(index.name(), "blue");
        assert_eq!(index.color(), PALETTE[1].0);
    }

    #[test]
    fn test_out_of_range_is_rejected_on_deserialize() {
        assert!(serde_json::from_str::<PaletteIndex>("10").is_err());
        assert_eq!(serde_json::from_str::<PaletteIndex>("9").unwrap().get(), 9);
    }
}
