//! Default theme roles: mapping a palette onto semantic UI slots.
//!
//! [`assign_roles`] is a heuristic starting point. Callers layer manual
//! per-role overrides on top with [`ColorMap::set`].

use std::fmt;
use std::str::FromStr;

use phi_color::{FullColor, Rgb, TextTone};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PaletteError;
use crate::export::kebab_case;
use crate::palette::Palette;

/// Near-black text for light backgrounds.
pub const DARK_TEXT: &str = "#0f172a";

/// Near-white text for dark backgrounds.
pub const LIGHT_TEXT: &str = "#f8fafc";

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A semantic UI slot a palette color can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Surface,
    Primary,
    Secondary,
    TextOnBackground,
    TextOnSurface,
    TextOnPrimary,
    Heading,
}

impl Role {
    /// Every role, in display and export order.
    pub const ALL: [Self; 8] = [
        Self::Background,
        Self::Surface,
        Self::Primary,
        Self::Secondary,
        Self::TextOnBackground,
        Self::TextOnSurface,
        Self::TextOnPrimary,
        Self::Heading,
    ];

    /// The camelCase name used in saved maps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::TextOnBackground => "textOnBackground",
            Self::TextOnSurface => "textOnSurface",
            Self::TextOnPrimary => "textOnPrimary",
            Self::Heading => "heading",
        }
    }

    /// The kebab-case name used for CSS and SCSS variables.
    #[must_use]
    pub fn token_name(self) -> String {
        kebab_case(self.name())
    }

    /// Look up a role by its camelCase or kebab-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.name() == name || role.token_name() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownRole(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ColorMap
// ---------------------------------------------------------------------------

/// One hex color per [`Role`]. Every role is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMap {
    pub background: String,
    pub surface: String,
    pub primary: String,
    pub secondary: String,
    pub text_on_background: String,
    pub text_on_surface: String,
    pub text_on_primary: String,
    pub heading: String,
}

impl ColorMap {
    /// The map used when there is no palette to derive from.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            background: "#f1f5f9".to_owned(),
            surface: "#ffffff".to_owned(),
            primary: "#4f46e5".to_owned(),
            secondary: "#0ea5e9".to_owned(),
            text_on_background: DARK_TEXT.to_owned(),
            text_on_surface: DARK_TEXT.to_owned(),
            text_on_primary: "#ffffff".to_owned(),
            heading: DARK_TEXT.to_owned(),
        }
    }

    #[must_use]
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Background => &self.background,
            Role::Surface => &self.surface,
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::TextOnBackground => &self.text_on_background,
            Role::TextOnSurface => &self.text_on_surface,
            Role::TextOnPrimary => &self.text_on_primary,
            Role::Heading => &self.heading,
        }
    }

    /// Overwrite one role, leaving the others untouched.
    pub fn set(&mut self, role: Role, hex: impl Into<String>) {
        let slot = match role {
            Role::Background => &mut self.background,
            Role::Surface => &mut self.surface,
            Role::Primary => &mut self.primary,
            Role::Secondary => &mut self.secondary,
            Role::TextOnBackground => &mut self.text_on_background,
            Role::TextOnSurface => &mut self.text_on_surface,
            Role::TextOnPrimary => &mut self.text_on_primary,
            Role::Heading => &mut self.heading,
        };
        *slot = hex.into();
    }

    /// `(role, hex)` pairs in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::fallback()
    }
}

// ---------------------------------------------------------------------------
// Default assignment
// ---------------------------------------------------------------------------

/// Text color for a background, by the YIQ brightness test.
#[must_use]
pub fn text_color_for(background: Rgb) -> &'static str {
    match TextTone::for_background(background) {
        TextTone::Dark => DARK_TEXT,
        TextTone::Light => LIGHT_TEXT,
    }
}

/// Palette colors picked for the non-text roles.
struct Picks<'a> {
    background: &'a FullColor,
    surface: &'a FullColor,
    primary: &'a FullColor,
    secondary: &'a FullColor,
}

/// Pick the structural roles from two stable sorted views of `colors`:
///
/// | role       | pick                                                    |
/// |------------|---------------------------------------------------------|
/// | background | darkest                                                 |
/// | surface    | second darkest, else background                         |
/// | primary    | most saturated                                          |
/// | secondary  | lightest, unless its hex equals primary's or background's; then second most saturated, else primary |
fn pick(colors: &[FullColor]) -> Option<Picks<'_>> {
    let mut by_lightness: Vec<&FullColor> = colors.iter().collect();
    by_lightness.sort_by(|a, b| a.hsl().l.total_cmp(&b.hsl().l));
    let mut by_saturation: Vec<&FullColor> = colors.iter().collect();
    by_saturation.sort_by(|a, b| b.hsl().s.total_cmp(&a.hsl().s));

    let background = *by_lightness.first()?;
    let surface = by_lightness.get(1).copied().unwrap_or(background);
    let primary = *by_saturation.first()?;
    let lightest = *by_lightness.last()?;

    let secondary = if lightest.hex() == primary.hex() || lightest.hex() == background.hex() {
        trace!(lightest = lightest.hex(), "secondary collides, falling back to saturation");
        by_saturation.get(1).copied().unwrap_or(primary)
    } else {
        lightest
    };

    Some(Picks {
        background,
        surface,
        primary,
        secondary,
    })
}

/// Derive a default [`ColorMap`] from a palette.
///
/// An empty palette yields [`ColorMap::fallback`]. Otherwise every role is
/// filled from the palette, `heading` mirrors `secondary`, and each text
/// role takes [`DARK_TEXT`] or [`LIGHT_TEXT`] depending on the YIQ
/// brightness of the color it sits on.
#[must_use]
pub fn assign_roles(palette: &Palette) -> ColorMap {
    let Some(picks) = pick(palette.colors()) else {
        return ColorMap::fallback();
    };

    ColorMap {
        background: picks.background.hex().to_owned(),
        surface: picks.surface.hex().to_owned(),
        primary: picks.primary.hex().to_owned(),
        secondary: picks.secondary.hex().to_owned(),
        text_on_background: text_color_for(picks.background.rgb()).to_owned(),
        text_on_surface: text_color_for(picks.surface.rgb()).to_owned(),
        text_on_primary: text_color_for(picks.primary.rgb()).to_owned(),
        heading: picks.secondary.hex().to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{PaletteRequest, generate_palette};
    use phi_color::Hsl;
    use pretty_assertions::assert_eq;

    fn palette(colors: &[(f64, f64, f64)]) -> Palette {
        colors.iter().map(|&(h, s, l)| FullColor::from_hsl(Hsl::new(h, s, l))).collect()
    }

    // ── Role names ──────────────────────────────────────────

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().unwrap(), role);
            assert_eq!(role.token_name().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn token_names_are_kebab_case() {
        assert_eq!(Role::TextOnBackground.token_name(), "text-on-background");
        assert_eq!(Role::Heading.token_name(), "heading");
    }

    #[test]
    fn unknown_role_is_an_error() {
        assert!(matches!("footer".parse::<Role>(), Err(PaletteError::UnknownRole(name)) if name == "footer"));
    }

    // ── ColorMap ────────────────────────────────────────────

    #[test]
    fn set_touches_one_role() {
        let mut map = ColorMap::fallback();
        map.set(Role::Primary, "#123456");
        assert_eq!(map.get(Role::Primary), "#123456");
        assert_eq!(map.get(Role::Secondary), "#0ea5e9");
    }

    #[test]
    fn iter_follows_role_order() {
        let roles: Vec<Role> = ColorMap::fallback().iter().map(|(role, _)| role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ColorMap::fallback()).unwrap();
        assert_eq!(json["textOnPrimary"], "#ffffff");
        assert_eq!(json["background"], "#f1f5f9");
    }

    // ── assign_roles ────────────────────────────────────────

    #[test]
    fn empty_palette_uses_fallback() {
        let map = assign_roles(&Palette::default());
        assert_eq!(map, ColorMap::fallback());
        assert_eq!(map.get(Role::TextOnBackground), DARK_TEXT);
    }

    #[test]
    fn default_palette_roles() {
        // Lightness: base 59, then 28, 55, 23. All saturations are equal, so
        // the base stays most saturated and the lightest (the base) collides
        // with primary.
        let map = assign_roles(&generate_palette(&PaletteRequest::default()));
        assert_eq!(map.background, "#0a6b0b");
        assert_eq!(map.surface, "#83520c");
        assert_eq!(map.primary, "#40edd9");
        assert_eq!(map.secondary, "#83520c");
        assert_eq!(map.heading, map.secondary);
        assert_eq!(map.text_on_background, LIGHT_TEXT);
        assert_eq!(map.text_on_surface, LIGHT_TEXT);
        assert_eq!(map.text_on_primary, DARK_TEXT);
    }

    #[test]
    fn single_color_fills_every_role() {
        let map = assign_roles(&palette(&[(200.0, 50.0, 50.0)]));
        let hex = FullColor::from_hsl(Hsl::new(200.0, 50.0, 50.0)).hex().to_owned();
        for role in [Role::Background, Role::Surface, Role::Primary, Role::Secondary, Role::Heading] {
            assert_eq!(map.get(role), hex, "{role}");
        }
    }

    #[test]
    fn lightest_is_secondary_when_distinct() {
        let colors = palette(&[(0.0, 90.0, 50.0), (120.0, 40.0, 20.0), (240.0, 30.0, 85.0)]);
        let map = assign_roles(&colors);
        assert_eq!(map.background, colors.colors()[1].hex());
        assert_eq!(map.surface, colors.colors()[0].hex());
        assert_eq!(map.primary, colors.colors()[0].hex());
        assert_eq!(map.secondary, colors.colors()[2].hex());
        assert_eq!(map.heading, colors.colors()[2].hex());
    }

    #[test]
    fn secondary_falls_back_to_second_most_saturated() {
        // The lightest is also the most saturated.
        let colors = palette(&[(0.0, 90.0, 80.0), (120.0, 40.0, 20.0), (240.0, 60.0, 40.0)]);
        let map = assign_roles(&colors);
        assert_eq!(map.primary, colors.colors()[0].hex());
        assert_eq!(map.secondary, colors.colors()[2].hex());
    }

    #[test]
    fn ties_keep_palette_order() {
        let colors = palette(&[(10.0, 50.0, 40.0), (200.0, 50.0, 40.0)]);
        let map = assign_roles(&colors);
        assert_eq!(map.background, colors.colors()[0].hex());
        assert_eq!(map.surface, colors.colors()[1].hex());
        assert_eq!(map.primary, colors.colors()[0].hex());
    }

    #[test]
    fn text_color_follows_yiq() {
        assert_eq!(text_color_for(Rgb::WHITE), DARK_TEXT);
        assert_eq!(text_color_for(Rgb::BLACK), LIGHT_TEXT);
        // yiq = 128.0 exactly counts as light.
        assert_eq!(text_color_for(Rgb::new(128, 128, 128)), DARK_TEXT);
        assert_eq!(text_color_for(Rgb::new(127, 127, 127)), LIGHT_TEXT);
    }
}
