use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Ocean theme colours
// ---------------------------------------------------------------------------

/// Page background.
pub const OCEAN_BACKGROUND: Color32 = Color32::from_rgb(0xe0, 0xf7, 0xfa);
/// Welcome banner fill.
pub const BANNER_FILL: Color32 = Color32::from_rgb(0xb3, 0xe5, 0xfc);
/// Banner text and line-chart stroke.
pub const DEEP_BLUE: Color32 = Color32::from_rgb(0x01, 0x57, 0x9b);

/// Generates `n` blues running from light to dark, one per bar.
pub fn blues_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
            let hsl = Hsl::new(208.0, 0.65 + 0.2 * t, 0.82 - 0.5 * t);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
