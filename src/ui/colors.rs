//! Color definitions for the terminal map view

use ratatui::style::Color;

/// Vegetation color ramp, pale yellow (bare) to dark green (lush)
pub const VEG_RAMP: [Color; 8] = [
    Color::Rgb(255, 255, 229),
    Color::Rgb(247, 252, 185),
    Color::Rgb(217, 240, 163),
    Color::Rgb(173, 221, 142),
    Color::Rgb(120, 198, 121),
    Color::Rgb(65, 171, 93),
    Color::Rgb(35, 132, 67),
    Color::Rgb(0, 90, 50),
];

/// Cells whose plant state was never initialized render as bare earth
pub const BARE_EARTH: Color = Color::Rgb(40, 40, 40);

/// Occupant counts are drawn dark against the ramp
pub const OCCUPANT_FG: Color = Color::Rgb(0, 0, 0);

/// Ramp band for a cell: `floor((amount / veg_max) * 7)`
///
/// Clamped into the band range for display, so negative amounts and
/// over-capacity cells still map to a real color.
pub fn vegetation_band(amount: f32, veg_max: f32) -> usize {
    if veg_max <= 0.0 {
        return 0;
    }
    let scaled = ((amount / veg_max) * (VEG_RAMP.len() - 1) as f32).floor() as i32;
    scaled.clamp(0, VEG_RAMP.len() as i32 - 1) as usize
}

/// Ramp color for a cell's plant state
pub fn vegetation_color(amount: f32, veg_max: f32) -> Color {
    VEG_RAMP[vegetation_band(amount, veg_max)]
}
