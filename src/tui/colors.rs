// Color palette for the deck UI

use crate::engine::GlowTint;
use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(22, 22, 30);
pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 140, 160);
pub const BORDER_COLOR: Color = Color::Rgb(80, 80, 100);
pub const BORDER_DIM: Color = Color::Rgb(50, 50, 64);

/// Pass / left
pub const ACCENT_PRIMARY: Color = Color::Rgb(235, 87, 87);
/// Pick / right
pub const ACCENT_SECONDARY: Color = Color::Rgb(80, 200, 120);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(250, 180, 70);

pub fn tint_color(tint: GlowTint) -> Color {
    match tint {
        GlowTint::Pick => ACCENT_SECONDARY,
        GlowTint::Pass => ACCENT_PRIMARY,
    }
}

/// Linear blend between two RGB colors; `t` is clamped to `0.0..=1.0`.
/// Non-RGB colors snap at the midpoint.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t >= 0.5 => to,
        _ => from,
    }
}
