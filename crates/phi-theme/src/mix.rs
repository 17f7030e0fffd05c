//! Golden-mean color mixing.
//!
//! Blends two colors in the proportion 1/φ : 1 − 1/φ (about 61.8% to
//! 38.2%), channel by channel in 8-bit sRGB.

use phi_color::{FullColor, Rgb};

use crate::palette::Palette;

/// The golden ratio φ, to the precision saved palettes were mixed with.
pub const PHI: f64 = 1.618_033_988_75;

/// Weighted average of two colors: `1/φ` of `a`, `1 − 1/φ` of `b`.
///
/// Each channel rounds on its own. Not commutative: the first argument
/// dominates.
#[must_use]
pub fn mix(a: Rgb, b: Rgb) -> Rgb {
    let ratio = 1.0 / PHI;
    let channel = |x: u8, y: u8| blend(x, y, ratio);
    Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::suboptimal_flops)]
fn blend(x: u8, y: u8, ratio: f64) -> u8 {
    // Both weights are in [0, 1] and sum to 1, so the result stays in [0, 255].
    (f64::from(x) * ratio + f64::from(y) * (1.0 - ratio)).round() as u8
}

/// Mix the base of `palette` with each of its complementary colors, in order.
///
/// Mixed colors carry whole-unit HSL re-derived from their RGB.
#[must_use]
pub fn golden_mixes(palette: &Palette) -> Vec<FullColor> {
    let Some(base) = palette.base() else {
        return Vec::new();
    };
    palette
        .complementary()
        .iter()
        .map(|color| FullColor::from_rgb(mix(base.rgb(), color.rgb())))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
