// SPDX-License-Identifier: MIT
//
// Terminal swatches: palette and role listings for the `text` format.
//
// With color enabled each hex code is printed on its own color as a
// 24-bit background, in whichever text tone the YIQ test picks:
//
//   ESC[48;2;R;G;Bm ESC[38;2;R;G;Bm " #40edd9 " ESC[0m  base  hsl(...)  rgb(...)
//
// Without color (stdout is not a terminal) the same lines are printed
// without escape sequences.

use std::io::{self, Write};

use phi_color::{FullColor, Rgb, hex_to_rgb};
use phi_theme::roles::text_color_for;
use phi_theme::{ColorMap, Palette};

// ─── SGR sequences ───────────────────────────────────────────────────────────

/// Set a 24-bit foreground color.
#[inline]
pub fn fg(w: &mut impl Write, rgb: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// Set a 24-bit background color.
#[inline]
pub fn bg(w: &mut impl Write, rgb: Rgb) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// Reset all attributes.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Swatches ────────────────────────────────────────────────────────────────

/// Write ` #rrggbb ` on its own color, or plain `#rrggbb` without color.
pub fn chip(w: &mut impl Write, hex: &str, colored: bool) -> io::Result<()> {
    match hex_to_rgb(hex).filter(|_| colored) {
        Some(rgb) => {
            bg(w, rgb)?;
            // text_color_for only returns valid constants.
            fg(w, hex_to_rgb(text_color_for(rgb)).unwrap_or(Rgb::BLACK))?;
            write!(w, " {hex} ")?;
            reset(w)
        }
        None => write!(w, "{hex}"),
    }
}

/// One palette entry: chip, label, then HSL and RGB forms.
pub fn color_line(w: &mut impl Write, label: &str, color: &FullColor, colored: bool) -> io::Result<()> {
    chip(w, color.hex(), colored)?;
    writeln!(w, "  {label:<14} {:<22} {}", color.hsl().to_string(), color.rgb())
}

/// A titled palette, base first.
pub fn palette(w: &mut impl Write, title: &str, palette: &Palette, colored: bool) -> io::Result<()> {
    writeln!(w, "{title}")?;
    for (i, color) in palette.iter().enumerate() {
        let label = if i == 0 { "base".to_owned() } else { format!("color {i}") };
        color_line(w, &label, color, colored)?;
    }
    Ok(())
}

/// Every role of `map`, in role order.
pub fn color_map(w: &mut impl Write, map: &ColorMap, colored: bool) -> io::Result<()> {
    writeln!(w, "roles")?;
    for (role, hex) in map.iter() {
        chip(w, hex, colored)?;
        writeln!(w, "  {role}")?;
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
