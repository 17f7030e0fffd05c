//! Palette files: a JSON array of `{hsl, rgb, hex}` objects, base first.
//!
//! On load only `hsl` is trusted. RGB and hex are re-derived from it, so a
//! hand-edited file can never carry inconsistent representations.

use phi_color::{FullColor, Hsl};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{PaletteError, Result};
use crate::palette::{MAX_COMPLEMENTARY, Palette};

/// Serialize a palette as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PaletteError::Json`] if serialization fails.
pub fn palette_to_json(palette: &Palette) -> Result<String> {
    Ok(serde_json::to_string_pretty(palette)?)
}

/// Parse and validate a palette file.
///
/// The document must be a non-empty array. Every entry needs an `hsl`
/// object with numeric `h`, `s` and `l`; other fields are ignored. At most
/// [`MAX_COMPLEMENTARY`] entries may follow the base.
///
/// # Errors
///
/// - [`PaletteError::Json`] if the text is not a JSON array.
/// - [`PaletteError::EmptyPalette`] for `[]`.
/// - [`PaletteError::MissingHsl`] naming the first entry without usable HSL.
/// - [`PaletteError::TooManyColors`] for more than four complementary entries.
pub fn palette_from_json(json: &str) -> Result<Palette> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    let Some((base, complementary)) = entries.split_first() else {
        return Err(PaletteError::EmptyPalette);
    };

    let base = entry_hsl(base).ok_or(PaletteError::MissingHsl { index: 0 })?;
    if complementary.len() > MAX_COMPLEMENTARY {
        return Err(PaletteError::TooManyColors {
            count: complementary.len(),
        });
    }

    let complementary = complementary
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry_hsl(entry)
                .map(FullColor::from_hsl)
                .ok_or(PaletteError::MissingHsl { index: i + 1 })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(base = %base, complementary = complementary.len(), "loaded palette");
    Ok(Palette::with_base(FullColor::from_hsl(base), complementary))
}

fn entry_hsl(entry: &Value) -> Option<Hsl> {
    entry.get("hsl").and_then(|hsl| Hsl::deserialize(hsl).ok())
}

/// Suggested file name for a saved palette: `phicolors-palette-<base hex>.json`.
#[must_use]
pub fn export_file_name(palette: &Palette) -> Option<String> {
    let base = palette.base()?;
    let hex = base.hex().trim_start_matches('#');
    Some(format!("phicolors-palette-{hex}.json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
