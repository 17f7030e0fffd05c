//! Hue pattern engine: golden-angle sequences and classic harmonies.
//!
//! Two independent schemes:
//!
//! - [`generate_hues`]: repeated golden-angle rotation from a base hue,
//!   used for the complementary colors of a generated palette.
//! - [`Harmony`]: fixed offset tables (analogous, triadic, ...) that always
//!   produce exactly five colors, base first.

use std::fmt;
use std::str::FromStr;

use phi_color::{FullColor, Hsl, normalize_hue};

use crate::error::PaletteError;

/// Golden angle in degrees, as pinned for palette reproducibility.
///
/// The exact value is 360 / φ² = 137.507 764...; the shorter literal is what
/// saved palettes were generated with, and the two drift apart by about
/// 0.0078 degrees per rotation.
pub const GOLDEN_ANGLE: f64 = 137.5;

/// Rotate a hue in [0, 360) by up to ±360 degrees, wrapping into [0, 360).
///
/// Computed as `(hue + degrees + 360) % 360` to reproduce saved palettes
/// bit for bit.
fn rotate(hue: f64, degrees: f64) -> f64 {
    (hue + degrees + 360.0) % 360.0
}

/// Generate `count` hues by repeatedly rotating backwards by the golden angle.
///
/// The first hue is `base_hue - GOLDEN_ANGLE` (not the base itself); each
/// subsequent hue rotates from the previous one. All values are in [0, 360).
#[must_use]
pub fn generate_hues(base_hue: f64, count: usize) -> Vec<f64> {
    std::iter::successors(Some(normalize_hue(base_hue)), |&hue| Some(rotate(hue, -GOLDEN_ANGLE)))
        .skip(1)
        .take(count)
        .collect()
}

// ---------------------------------------------------------------------------
// Harmony
// ---------------------------------------------------------------------------

/// A named fixed-offset color harmony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Harmony {
    /// Neighbours at ±30 and ±60 degrees.
    Analogous,
    /// One hue, lightness stepped by 20 in both directions.
    Monochromatic,
    /// ±120 plus ±90 degrees.
    Triadic,
    /// Opposite hue plus ±30 and +150 degrees.
    Complementary,
    /// ±150 plus ±120 degrees.
    SplitComplementary,
}

impl Harmony {
    /// Hue offsets in output order. The first is always 0 (the base).
    const ANALOGOUS: [f64; 5] = [0.0, 30.0, -30.0, 60.0, -60.0];
    const TRIADIC: [f64; 5] = [0.0, 120.0, -120.0, 90.0, -90.0];
    const COMPLEMENTARY: [f64; 5] = [0.0, 180.0, 30.0, -30.0, 150.0];
    const SPLIT_COMPLEMENTARY: [f64; 5] = [0.0, 150.0, -150.0, 120.0, -120.0];

    /// Lightness offsets for [`Harmony::Monochromatic`].
    const MONOCHROMATIC: [f64; 5] = [-40.0, -20.0, 0.0, 20.0, 40.0];

    /// Kebab-case name, as used on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Monochromatic => "monochromatic",
            Self::Triadic => "triadic",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
        }
    }

    /// Parse a harmony from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|h| h.name() == lower).copied()
    }

    /// All harmony kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Analogous,
            Self::Monochromatic,
            Self::Triadic,
            Self::Complementary,
            Self::SplitComplementary,
        ]
    }

    /// Generate this harmony's five colors from `base`. See [`generate_harmony`].
    #[must_use]
    pub fn generate(self, base: Hsl) -> Vec<FullColor> {
        generate_harmony(base, self)
    }

    const fn hue_offsets(self) -> Option<&'static [f64; 5]> {
        match self {
            Self::Analogous => Some(&Self::ANALOGOUS),
            Self::Triadic => Some(&Self::TRIADIC),
            Self::Complementary => Some(&Self::COMPLEMENTARY),
            Self::SplitComplementary => Some(&Self::SPLIT_COMPLEMENTARY),
            Self::Monochromatic => None,
        }
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Harmony {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownHarmony(s.to_owned()))
    }
}

/// Generate the five colors of `harmony` around `base`.
///
/// Hue harmonies keep the base's saturation and lightness and apply the
/// offset table to the hue, wrapped into [0, 360). Monochromatic keeps hue
/// and saturation and shifts lightness by -40, -20, 0, +20, +40, clamped to
/// [0, 100]. Output follows table order, never sorted.
#[must_use]
pub fn generate_harmony(base: Hsl, harmony: Harmony) -> Vec<FullColor> {
    let base_hue = normalize_hue(base.h);
    match harmony.hue_offsets() {
        Some(offsets) => offsets
            .iter()
            .map(|&offset| FullColor::from_hsl(Hsl { h: rotate(base_hue, offset), ..base }))
            .collect(),
        None => Harmony::MONOCHROMATIC
            .iter()
            .map(|&offset| FullColor::from_hsl(base.with_lightness((base.l + offset).clamp(0.0, 100.0))))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// HarmonyChoice
// ---------------------------------------------------------------------------

/// Which palette a caller is looking at: the generated one or a harmony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HarmonyChoice {
    /// The golden-angle palette, as generated (and possibly hand-edited).
    #[default]
    Current,
    /// A fixed harmony of the base color.
    Kind(Harmony),
}

impl HarmonyChoice {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Kind(harmony) => harmony.name(),
        }
    }
}

impl fmt::Display for HarmonyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyChoice {
    type Err = PaletteError;

    /// `current` or `none` select the generated palette; anything else must
    /// name a [`Harmony`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" | "none" => Ok(Self::Current),
            _ => s.parse().map(Self::Kind),
        }
    }
}

impl From<Harmony> for HarmonyChoice {
    fn from(harmony: Harmony) -> Self {
        Self::Kind(harmony)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
