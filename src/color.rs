use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

pub const ORIGIN_COLOR: Color32 = Color32::from_rgb(220, 60, 60);
pub const DESTINATION_COLOR: Color32 = Color32::from_rgb(60, 110, 220);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: equipment type → Color32
// ---------------------------------------------------------------------------

/// Stable colour per category label, so a category keeps its colour across
/// charts and filter changes.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(labels: &[String]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels.iter().cloned().zip(palette).collect();
        CategoryColors { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}
