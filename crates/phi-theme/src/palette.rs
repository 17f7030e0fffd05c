//! Palette generation from a base color.
//!
//! A palette is the base color followed by up to four complementary colors
//! spaced around the wheel by the golden angle. Complementary colors keep
//! the base's saturation and lightness unless contrast correction moves
//! their lightness.

use std::iter;
use std::slice;

use phi_color::{FullColor, Hsl};
use serde::Serialize;
use tracing::debug;

use crate::contrast::{AA_RATIO, adjust_for_contrast};
use crate::pattern::{HarmonyChoice, generate_harmony, generate_hues};

/// Most complementary colors a palette carries by convention.
pub const MAX_COMPLEMENTARY: usize = 4;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// An ordered list of colors. The first, if any, is the base.
///
/// Serializes as a plain JSON array of `{hsl, rgb, hex}` objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<FullColor>);

impl Palette {
    #[must_use]
    pub const fn new(colors: Vec<FullColor>) -> Self {
        Self(colors)
    }

    /// Build from a base and its complementary colors.
    #[must_use]
    pub fn with_base(base: FullColor, complementary: impl IntoIterator<Item = FullColor>) -> Self {
        iter::once(base).chain(complementary).collect()
    }

    /// The base color, or `None` for an empty palette.
    #[must_use]
    pub fn base(&self) -> Option<&FullColor> {
        self.0.first()
    }

    /// Every color after the base.
    #[must_use]
    pub fn complementary(&self) -> &[FullColor] {
        self.0.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn colors(&self) -> &[FullColor] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, FullColor> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<FullColor> {
        self.0
    }
}

impl FromIterator<FullColor> for Palette {
    fn from_iter<I: IntoIterator<Item = FullColor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a FullColor;
    type IntoIter = slice::Iter<'a, FullColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// PaletteRequest
// ---------------------------------------------------------------------------

/// Everything that determines a generated palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteRequest {
    /// The base color; complementary hues rotate away from its hue.
    pub base: Hsl,
    /// Number of complementary colors, 0 to [`MAX_COMPLEMENTARY`] by
    /// convention. Not enforced here.
    pub count: usize,
    /// Correct complementary lightness toward `target_ratio` against the base.
    pub auto_adjust: bool,
    /// Contrast target, typically 4.5 (AA) or 7.0 (AAA).
    pub target_ratio: f64,
}

impl PaletteRequest {
    /// Default base color: hsl(173, 83%, 59%), a bright teal.
    pub const DEFAULT_BASE: Hsl = Hsl::new(173.0, 83.0, 59.0);

    /// Default number of complementary colors.
    pub const DEFAULT_COUNT: usize = 3;
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            count: Self::DEFAULT_COUNT,
            auto_adjust: true,
            target_ratio: AA_RATIO,
        }
    }
}

/// Generate the complementary colors of a request, in rotation order.
#[must_use]
pub fn generate_complementary(request: &PaletteRequest) -> Vec<FullColor> {
    let base = request.base;
    let base_rgb = base.to_rgb();

    generate_hues(base.h, request.count)
        .into_iter()
        .map(|h| {
            let hsl = Hsl { h, ..base };
            if request.auto_adjust {
                adjust_for_contrast(hsl, base_rgb, request.target_ratio)
            } else {
                hsl
            }
        })
        .map(FullColor::from_hsl)
        .collect()
}

/// Generate a full palette: `[base, complementary...]`.
#[must_use]
pub fn generate_palette(request: &PaletteRequest) -> Palette {
    let palette = Palette::with_base(FullColor::from_hsl(request.base), generate_complementary(request));
    debug!(
        base = %request.base,
        count = request.count,
        auto_adjust = request.auto_adjust,
        target = request.target_ratio,
        "generated palette"
    );
    palette
}

/// The palette a caller should display and theme: `generated` itself for
/// [`HarmonyChoice::Current`], otherwise the chosen harmony of its base.
#[must_use]
pub fn active_palette(generated: &Palette, choice: HarmonyChoice) -> Palette {
    match (choice, generated.base()) {
        (HarmonyChoice::Kind(harmony), Some(base)) => Palette::new(generate_harmony(base.hsl(), harmony)),
        _ => generated.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{AAA_RATIO, contrast_ratio};
    use crate::pattern::Harmony;
    use pretty_assertions::assert_eq;

    fn hexes(palette: &Palette) -> Vec<&str> {
        palette.iter().map(FullColor::hex).collect()
    }

    #[test]
    fn default_palette_is_corrected_to_aa() {
        let palette = generate_palette(&PaletteRequest::default());
        assert_eq!(hexes(&palette), vec!["#40edd9", "#83520c", "#662deb", "#0a6b0b"]);
        let lightness: Vec<f64> = palette.complementary().iter().map(|c| c.hsl().l).collect();
        assert_eq!(lightness, vec![28.0, 55.0, 23.0]);
    }

    #[test]
    fn uncorrected_palette_keeps_base_saturation_and_lightness() {
        let request = PaletteRequest { auto_adjust: false, ..PaletteRequest::default() };
        let palette = generate_palette(&request);
        assert_eq!(hexes(&palette), vec!["#40edd9", "#eda640", "#7440ed", "#40ed41"]);
        for c in palette.complementary() {
            assert_eq!((c.hsl().s, c.hsl().l), (83.0, 59.0));
        }
    }

    #[test]
    fn aaa_target_meets_seven_to_one() {
        let request = PaletteRequest { count: 4, target_ratio: AAA_RATIO, ..PaletteRequest::default() };
        let palette = generate_palette(&request);
        assert_eq!(hexes(&palette)[1..].to_vec(), vec!["#593808", "#4411bb", "#074b08", "#7e0c2c"]);
        let base = palette.base().unwrap().rgb();
        for c in palette.complementary() {
            assert!(contrast_ratio(c.rgb(), base) >= AAA_RATIO, "{c}");
        }
    }

    #[test]
    fn zero_count_is_base_only() {
        let request = PaletteRequest { count: 0, ..PaletteRequest::default() };
        let palette = generate_palette(&request);
        assert_eq!(palette.len(), 1);
        assert!(palette.complementary().is_empty());
    }

    #[test]
    fn hues_follow_rotation_order() {
        let request = PaletteRequest { auto_adjust: false, ..PaletteRequest::default() };
        let hues: Vec<f64> = generate_complementary(&request).iter().map(|c| c.hsl().h).collect();
        assert_eq!(hues, vec![35.5, 258.0, 120.5]);
    }

    #[test]
    fn empty_palette_accessors() {
        let palette = Palette::default();
        assert!(palette.base().is_none());
        assert!(palette.complementary().is_empty());
        assert!(palette.is_empty());
    }

    #[test]
    fn active_palette_current_is_generated() {
        let generated = generate_palette(&PaletteRequest::default());
        assert_eq!(active_palette(&generated, HarmonyChoice::Current), generated);
    }

    #[test]
    fn active_palette_harmony_uses_base() {
        let generated = generate_palette(&PaletteRequest::default());
        let active = active_palette(&generated, HarmonyChoice::Kind(Harmony::Monochromatic));
        assert_eq!(active.len(), 5);
        assert_eq!(active.colors()[2].hsl(), PaletteRequest::DEFAULT_BASE);
    }

    #[test]
    fn active_palette_of_empty_is_empty() {
        let active = active_palette(&Palette::default(), HarmonyChoice::Kind(Harmony::Triadic));
        assert!(active.is_empty());
    }
}
