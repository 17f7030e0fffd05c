// SPDX-License-Identifier: MIT
//
// phi-color color model. HSL is the source of truth; RGB and hex are derived.
//
// Single-character variable names (r, g, b, h, s, l, p, q, t) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference formulas.
#![allow(clippy::many_single_char_names)]
// Formulas are written exactly as published: fusing them into mul_add would
// change the last bit of some channels and with it their rounding.
#![allow(clippy::suboptimal_flops)]
//
// Every palette color starts life as an HSL triple that the user edits.
// RGB and hex are always re-derived from it, never edited directly:
//
//   Hsl ──hsl_to_rgb──▶ Rgb ──rgb_to_hex──▶ "#rrggbb"
//    ▲                   │
//    └────rgb_to_hsl─────┘
//
// Conversions round each RGB channel independently and round HSL output to
// whole units, so an HSL → RGB → HSL trip may drift by ±1 per component.
// That drift is inherent to 8-bit channels and is tolerated, not corrected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL space.
///
/// - `h`: hue in degrees, [0, 360). Circular: values outside wrap mod 360.
/// - `s`: saturation percent, [0, 100].
/// - `l`: lightness percent, [0, 100].
///
/// The conversion functions do not enforce the ranges; use [`Hsl::clamped`]
/// at input boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to 8-bit RGB.
    #[inline]
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    /// Return a copy with hue and saturation kept and lightness replaced.
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Return a copy with hue wrapped into [0, 360) and saturation and
    /// lightness clamped to [0, 100].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            h: normalize_hue(self.h),
            s: self.s.clamp(0.0, 100.0),
            l: self.l.clamp(0.0, 100.0),
        }
    }
}

impl fmt::Display for Hsl {
    /// CSS functional notation: `hsl(173, 83%, 59%)`. The hue is rounded to
    /// a whole degree; saturation and lightness print as stored.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h.round(), self.s, self.l)
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB color. Always produced by rounding; never fractional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex string. See [`hex_to_rgb`].
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        hex_to_rgb(s)
    }

    /// Convert to HSL with whole-unit components.
    #[inline]
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb`.
    #[inline]
    #[must_use]
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    #[inline]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// YIQ perceived brightness, 0.0 (black) to 255.0 (white).
    ///
    /// A coarse heuristic, distinct from WCAG relative luminance. Only used
    /// to pick between light and dark text.
    #[must_use]
    pub fn yiq(self) -> f64 {
        (f64::from(self.r) * 299.0 + f64::from(self.g) * 587.0 + f64::from(self.b) * 114.0)
            / 1000.0
    }
}

impl fmt::Display for Rgb {
    /// CSS functional notation: `rgb(64, 237, 217)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a 3- or 6-digit hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct InvalidHex(pub String);

impl FromStr for Rgb {
    type Err = InvalidHex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| InvalidHex(s.to_owned()))
    }
}

// ─── TextTone ────────────────────────────────────────────────────────────────

/// Which kind of text reads best on a given background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTone {
    /// Dark text, for a visually light background.
    Dark,
    /// Light text, for a visually dark background.
    Light,
}

impl TextTone {
    /// YIQ brightness at or above this counts as a light background.
    pub const YIQ_THRESHOLD: f64 = 128.0;

    /// Pick a text tone for `background` using the YIQ test.
    #[must_use]
    pub fn for_background(background: Rgb) -> Self {
        if background.yiq() >= Self::YIQ_THRESHOLD {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// ─── FullColor ───────────────────────────────────────────────────────────────

/// One color in three mutually consistent representations.
///
/// Construct from HSL (the usual path) or from RGB (for derived colors such
/// as mixes, whose HSL is re-derived). The fields cannot be edited
/// independently, so the three forms never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullColor {
    hsl: Hsl,
    rgb: Rgb,
    hex: String,
}

impl FullColor {
    /// Build from HSL, deriving RGB and hex.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let rgb = hsl.to_rgb();
        Self {
            hsl,
            rgb,
            hex: rgb.to_hex(),
        }
    }

    /// Build from RGB, deriving whole-unit HSL and hex.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hsl: rgb.to_hsl(),
            rgb,
            hex: rgb.to_hex(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn hsl(&self) -> Hsl {
        self.hsl
    }

    #[inline]
    #[must_use]
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    #[inline]
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl From<Hsl> for FullColor {
    fn from(hsl: Hsl) -> Self {
        Self::from_hsl(hsl)
    }
}

impl fmt::Display for FullColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Wrap a hue into [0, 360).
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Convert HSL (degrees, percent, percent) to 8-bit RGB.
///
/// Standard formula from the HSL article on Wikipedia. Each channel is
/// rounded to the nearest integer on its own.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = normalize_hue(h) / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    // s == 0 collapses p and q to l, giving an achromatic gray.
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb {
        r: to_u8(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_u8(hue_to_channel(p, q, h)),
        b: to_u8(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Convert 8-bit RGB to HSL, rounding every component to a whole unit.
///
/// A hue that rounds up to 360 wraps to 0.
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let (rf, gf, bf) = (unit(r), unit(g), unit(b));
    let (hi, lo) = (unit(max), unit(min));
    let l = (hi + lo) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = hi - lo;
        let s = if l > 0.5 { d / (2.0 - hi - lo) } else { d / (hi + lo) };
        let h = if max == r {
            (gf - bf) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (bf - rf) / d + 2.0
        } else {
            (rf - gf) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl {
        h: (h * 360.0).round() % 360.0,
        s: (s * 100.0).round(),
        l: (l * 100.0).round(),
    }
}

/// Parse a hex color into RGB.
///
/// Accepts an optional leading `#`, then either 3 digits (`#f80`, each digit
/// doubled) or 6 digits (`#ff8800`), in any case. Returns `None` for any
/// other length or for non-hex characters.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex).as_bytes();

    match digits.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(digits[0])?;
            let g = parse_hex_digit(digits[1])?;
            let b = parse_hex_digit(digits[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&digits[0..2])?;
            let g = parse_hex_byte(&digits[2..4])?;
            let b = parse_hex_byte(&digits[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

/// Format RGB as lowercase `#rrggbb`, each channel zero-padded.
#[must_use]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Linearize one sRGB channel (0.0 to 1.0) per the WCAG 2.0 definition.
///
/// WCAG uses 0.03928 as the breakpoint (not the 0.04045 of IEC 61966-2-1);
/// the two agree on every 8-bit value.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

#[inline]
fn unit(c: u8) -> f64 {
    f64::from(c) / 255.0
}

/// Convert a float (0.0–1.0) to a u8 (0–255), rounding half away from zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
