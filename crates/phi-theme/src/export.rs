//! Token export: a [`ColorMap`] as CSS custom properties, SCSS variables,
//! or design-token JSON.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::{PaletteError, Result};
use crate::roles::ColorMap;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary regex"));

/// `textOnBackground` → `text-on-background`.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    CAMEL_BOUNDARY.replace_all(name, "$1-$2").to_lowercase()
}

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// `:root { --role: #hex; }`
    Css,
    /// `$role: #hex;`
    Scss,
    /// `{"phicolors": {"color": {"role": {"$value": "#hex", "$type": "color"}}}}`
    Tokens,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Css, Self::Scss, Self::Tokens];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Tokens => "tokens",
        }
    }

    /// Render `map` in this format.
    ///
    /// # Errors
    ///
    /// Only [`ExportFormat::Tokens`] can fail, if JSON serialization does.
    pub fn render(self, map: &ColorMap) -> Result<String> {
        match self {
            Self::Css => Ok(to_css(map)),
            Self::Scss => Ok(to_scss(map)),
            Self::Tokens => to_tokens(map),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "figma" => Ok(Self::Tokens),
            _ => Self::ALL
                .into_iter()
                .find(|format| format.name() == lower)
                .ok_or_else(|| PaletteError::UnknownFormat(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// CSS custom properties on `:root`, one per role.
#[must_use]
pub fn to_css(map: &ColorMap) -> String {
    let variables: Vec<String> = map
        .iter()
        .map(|(role, hex)| format!("  --{}: {hex};", role.token_name()))
        .collect();
    format!(":root {{\n{}\n}}", variables.join("\n"))
}

/// SCSS variables, one per line.
#[must_use]
pub fn to_scss(map: &ColorMap) -> String {
    map.iter()
        .map(|(role, hex)| format!("${}: {hex};", role.token_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct TokenFile<'a> {
    phicolors: TokenGroup<'a>,
}

#[derive(Serialize)]
struct TokenGroup<'a> {
    color: ColorTokens<'a>,
}

/// Role-keyed tokens, serialized in role order.
struct ColorTokens<'a>(&'a ColorMap);

#[derive(Serialize)]
struct ColorToken<'a> {
    #[serde(rename = "$value")]
    value: &'a str,
    #[serde(rename = "$type")]
    kind: &'static str,
}

impl Serialize for ColorTokens<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for (role, hex) in self.0.iter() {
            map.serialize_entry(role.name(), &ColorToken { value: hex, kind: "color" })?;
        }
        map.end()
    }
}

/// Design-token JSON (the W3C `$value`/`$type` shape Figma plugins read),
/// pretty-printed, keyed by camelCase role name.
///
/// # Errors
///
/// Returns [`PaletteError::Json`] if serialization fails.
pub fn to_tokens(map: &ColorMap) -> Result<String> {
    let file = TokenFile {
        phicolors: TokenGroup { color: ColorTokens(map) },
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
