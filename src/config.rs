// SPDX-License-Identifier: MIT
//
// Optional TOML configuration.
//
//   count = 3
//   auto_adjust = true
//   target_ratio = 4.5
//   harmony = "current"
//   format = "text"
//
//   [base]
//   h = 173
//   s = 83
//   l = 59
//
// Every key is optional; missing keys take the built-in defaults and
// command-line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phi_color::Hsl;
use phi_theme::palette::MAX_COMPLEMENTARY;
use phi_theme::{HarmonyChoice, PaletteRequest};
use serde::Deserialize;
use tracing::{debug, warn};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "phicolors.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base: Option<BaseConfig>,
    pub count: Option<usize>,
    pub auto_adjust: Option<bool>,
    pub target_ratio: Option<f64>,
    pub harmony: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Config {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path`, or `phicolors.toml` in the working directory if it exists,
    /// or the defaults.
    ///
    /// # Errors
    ///
    /// Fails if an explicit `path` cannot be read, or if the file found is
    /// not valid configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: PathBuf = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The palette request this config describes, with out-of-range values
    /// brought into range.
    #[must_use]
    pub fn request(&self) -> PaletteRequest {
        let defaults = PaletteRequest::default();

        let base = self.base.map_or(defaults.base, |b| {
            let raw = Hsl::new(b.h, b.s, b.l);
            let clamped = raw.clamped();
            if clamped != raw {
                warn!(from = %raw, to = %clamped, "base color out of range; clamped");
            }
            clamped
        });

        let count = self.count.map_or(defaults.count, |count| {
            if count > MAX_COMPLEMENTARY {
                warn!(count, max = MAX_COMPLEMENTARY, "count out of range; clamped");
            }
            count.min(MAX_COMPLEMENTARY)
        });

        let target_ratio = match self.target_ratio {
            None => defaults.target_ratio,
            Some(target) if (1.0..=21.0).contains(&target) => target,
            Some(target) if target.is_nan() => {
                warn!("contrast target is not a number; using default");
                defaults.target_ratio
            }
            Some(target) => {
                warn!(target, "contrast target out of range; clamped");
                target.clamp(1.0, 21.0)
            }
        };

        PaletteRequest {
            base,
            count,
            auto_adjust: self.auto_adjust.unwrap_or(defaults.auto_adjust),
            target_ratio,
        }
    }

    /// The configured harmony, if it names one.
    ///
    /// # Errors
    ///
    /// Returns an error if `harmony` is set to an unknown name.
    pub fn harmony(&self) -> Result<Option<HarmonyChoice>> {
        self.harmony
            .as_deref()
            .map(str::parse::<HarmonyChoice>)
            .transpose()
            .context("invalid harmony in configuration")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
