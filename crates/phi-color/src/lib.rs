// SPDX-License-Identifier: MIT
//
// phi-color: color value types for the phicolors palette engine.
//
// HSL is the editable source of truth; RGB and hex are derived from it.
// Everything here is a pure function over small `Copy` values, so callers
// can convert freely from any thread without coordination.

pub mod color;

pub use color::{
    FullColor, Hsl, InvalidHex, Rgb, TextTone, hex_to_rgb, hsl_to_rgb, normalize_hue,
    rgb_to_hex, rgb_to_hsl, srgb_to_linear,
};
