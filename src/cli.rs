// SPDX-License-Identifier: MIT
//
// Command-line interface.
//
//   phicolors generate [--hsl H,S,L | --hex COLOR] [--count N] [--target R]
//                      [--no-auto-adjust] [--edit N=H,S,L]... [--step N=DIR]...
//                      [--harmony KIND] [--role ROLE=COLOR]...
//                      [--format FORMAT] [--output PATH]
//   phicolors harmony KIND [--hsl H,S,L | --hex COLOR] [--format FORMAT]
//   phicolors contrast COLOR COLOR
//   phicolors import FILE [--format FORMAT]
//   phicolors mix COLOR COLOR
//
// Every command writes to any `impl Write`; `run` hands it a locked stdout
// and enables swatch colors only when stdout is a terminal.

use std::fmt;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use phi_color::{FullColor, Hsl, Rgb};
use phi_theme::exchange::export_file_name;
use phi_theme::{
    ColorMap, ContrastLevel, Direction, ExportFormat, Harmony, HarmonyChoice, Palette,
    PaletteError, Role, assign_roles, contrast_ratio, golden_mixes, mix, palette_from_json, palette_to_json,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::session::{PaletteSession, RoleSet};
use crate::swatch;

#[derive(Debug, Parser)]
#[command(
    name = "phicolors",
    about = "Golden-ratio color palettes with WCAG contrast correction",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). PHICOLORS_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file [default: ./phicolors.toml if present].
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a golden-angle palette and its default theme roles.
    Generate(GenerateArgs),

    /// Print a five-color harmony of a base color.
    Harmony(HarmonyArgs),

    /// Contrast ratio and WCAG grade of two colors.
    Contrast(PairArgs),

    /// Load a saved palette file and print it with its roles.
    Import(ImportArgs),

    /// Golden-mean mix of two colors (61.8% of the first).
    Mix(PairArgs),
}

/// Base color, as HSL or hex. Falls back to the configured base.
#[derive(Debug, Clone, Default, Args)]
pub struct BaseArgs {
    /// Base color as `h,s,l`, e.g. `173,83,59`.
    #[arg(long, value_name = "H,S,L", value_parser = parse_hsl, conflicts_with = "hex")]
    pub hsl: Option<Hsl>,

    /// Base color as hex, e.g. `#40edd9` or `4ed`.
    #[arg(long, value_name = "COLOR")]
    pub hex: Option<Rgb>,
}

impl BaseArgs {
    fn resolve(&self, fallback: Hsl) -> Hsl {
        self.hsl
            .map(Hsl::clamped)
            .or_else(|| self.hex.map(Rgb::to_hsl))
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub base: BaseArgs,

    /// Number of complementary colors.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub count: Option<u8>,

    /// Keep complementary lightness as generated.
    #[arg(long)]
    pub no_auto_adjust: bool,

    /// Contrast target against the base, e.g. 4.5 (AA) or 7 (AAA).
    #[arg(long, value_name = "RATIO", value_parser = parse_target)]
    pub target: Option<f64>,

    /// Show a harmony instead of the generated palette.
    #[arg(long, value_name = "KIND")]
    pub harmony: Option<HarmonyChoice>,

    /// Replace complementary color N (from 1) with `h,s,l`. Repeatable.
    #[arg(long = "edit", value_name = "N=H,S,L", value_parser = parse_edit)]
    pub edits: Vec<(usize, Hsl)>,

    /// Step complementary color N lighter or darker, e.g. `2=darker`.
    /// Repeatable. With auto-adjust on, jumps to the next AA-passing lightness.
    #[arg(long = "step", value_name = "N=DIRECTION", value_parser = parse_step)]
    pub steps: Vec<(usize, Direction)>,

    /// Pin a role to a color, e.g. `primary=#ff0099`. Repeatable.
    #[arg(long = "role", value_name = "ROLE=COLOR", value_parser = parse_role_override)]
    pub roles: Vec<(Role, Rgb)>,

    /// text, json, css, scss or tokens.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write to a file instead of stdout. A directory gets the suggested
    /// palette file name.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct HarmonyArgs {
    /// analogous, monochromatic, triadic, complementary or split-complementary.
    pub kind: Harmony,

    #[command(flatten)]
    pub base: BaseArgs,

    /// text, json, css, scss or tokens.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Palette JSON file, as written by `generate --format json`.
    pub file: PathBuf,

    /// text, json, css, scss or tokens.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Args)]
pub struct PairArgs {
    pub first: Rgb,
    pub second: Rgb,
}

// ─── Output format ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Swatches, mixes and roles for a terminal.
    #[default]
    Text,
    /// The palette file format.
    Json,
    /// The role map as CSS, SCSS or design tokens.
    Export(ExportFormat),
}

impl FromStr for OutputFormat {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => s.parse().map(Self::Export),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
            Self::Export(format) => write!(f, "{format}"),
        }
    }
}

// ─── Value parsers ───────────────────────────────────────────────────────────

fn parse_hsl(s: &str) -> Result<Hsl, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[h, sat, l] = parts.as_slice() else {
        return Err(format!("expected h,s,l but got {s:?}"));
    };
    let number = |part: &str| {
        part.trim_end_matches('%')
            .parse::<f64>()
            .map_err(|_| format!("not a number: {part:?}"))
    };
    Ok(Hsl::new(number(h)?, number(sat)?, number(l)?))
}

fn parse_target(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|_| format!("not a number: {s:?}"))?;
    if (1.0..=21.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("contrast ratios range from 1 to 21, got {ratio}"))
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(format!("expected a color number from 1 but got {s:?}")),
    }
}

fn parse_edit(s: &str) -> Result<(usize, Hsl), String> {
    let (index, hsl) = s
        .split_once('=')
        .ok_or_else(|| format!("expected N=H,S,L but got {s:?}"))?;
    Ok((parse_index(index)?, parse_hsl(hsl)?))
}

fn parse_step(s: &str) -> Result<(usize, Direction), String> {
    let (index, direction) = s
        .split_once('=')
        .ok_or_else(|| format!("expected N=lighter or N=darker but got {s:?}"))?;
    let direction = match direction.trim().to_lowercase().as_str() {
        "lighter" => Direction::Lighter,
        "darker" => Direction::Darker,
        other => return Err(format!("unknown direction {other:?}; use lighter or darker")),
    };
    Ok((parse_index(index)?, direction))
}

fn parse_role_override(s: &str) -> Result<(Role, Rgb), String> {
    let (role, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROLE=COLOR but got {s:?}"))?;
    let role: Role = role.trim().parse().map_err(|e: PaletteError| e.to_string())?;
    let color: Rgb = color.trim().parse().map_err(|e: phi_color::InvalidHex| e.to_string())?;
    Ok((role, color))
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Run a parsed command line against stdout.
///
/// # Errors
///
/// Propagates configuration, I/O and palette errors with context.
pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let colored = stdout.is_terminal();
    let mut out = stdout.lock();
    dispatch(&cli.command, &config, &mut out, colored)?;
    out.flush().context("failed to flush stdout")
}

/// Run one command, writing its output to `out`.
///
/// # Errors
///
/// Propagates configuration, I/O and palette errors with context.
pub fn dispatch(command: &Commands, config: &Config, out: &mut impl Write, colored: bool) -> Result<()> {
    match command {
        Commands::Generate(args) => run_generate(args, config, out, colored),
        Commands::Harmony(args) => run_harmony(args, config, out, colored),
        Commands::Contrast(args) => run_contrast(args, out, colored),
        Commands::Import(args) => run_import(args, config, out, colored),
        Commands::Mix(args) => run_mix(args, out, colored),
    }
}

fn output_format(requested: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = requested {
        return Ok(format);
    }
    config
        .format
        .as_deref()
        .map_or(Ok(OutputFormat::Text), str::parse)
        .context("invalid format in configuration")
}

fn run_generate(args: &GenerateArgs, config: &Config, out: &mut impl Write, colored: bool) -> Result<()> {
    let mut session = PaletteSession::new(config.request());
    session.set_base(args.base.resolve(session.request().base));
    if let Some(count) = args.count {
        session.set_count(usize::from(count));
    }
    if args.no_auto_adjust {
        session.set_auto_adjust(false);
    }
    if let Some(target) = args.target {
        session.set_target(target);
    }

    // Indices on the command line are 1-based; the parser rejects 0.
    for &(index, hsl) in &args.edits {
        if !session.edit_complementary(index - 1, hsl) {
            warn!(index, "no such complementary color; edit skipped");
        }
    }
    for &(index, direction) in &args.steps {
        if !session.step_complementary(index - 1, direction) {
            warn!(index, ?direction, "no further lightness step; skipped");
        }
    }

    if let Some(choice) = args.harmony.or(config.harmony()?) {
        session.select_harmony(choice);
    }
    for &(role, color) in &args.roles {
        session.override_role(role, color);
    }
    debug!(harmony = %session.harmony(), request = ?session.request(), "session ready");

    let format = output_format(args.format, config)?;
    match &args.output {
        Some(path) => {
            let mut buf = Vec::new();
            render_session(&session, format, &mut buf, false)?;
            let path = output_path(path, &session.active_palette());
            fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), %format, "wrote palette");
            writeln!(out, "wrote {}", path.display())?;
            Ok(())
        }
        None => render_session(&session, format, out, colored),
    }
}

fn output_path(path: &Path, palette: &Palette) -> PathBuf {
    if path.is_dir() {
        let name = export_file_name(palette).unwrap_or_else(|| "phicolors-palette.json".to_owned());
        path.join(name)
    } else {
        path.to_path_buf()
    }
}

fn run_harmony(args: &HarmonyArgs, config: &Config, out: &mut impl Write, colored: bool) -> Result<()> {
    let base = args.base.resolve(config.request().base);
    let palette = Palette::new(args.kind.generate(base));
    let map = assign_roles(&palette);
    let format = output_format(args.format, config)?;
    render(&palette, &map, format, out, colored)
}

fn run_import(args: &ImportArgs, config: &Config, out: &mut impl Write, colored: bool) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let palette = palette_from_json(&text).with_context(|| format!("invalid palette file {}", args.file.display()))?;

    let mut session = PaletteSession::new(config.request());
    session.load_palette(&palette);
    let format = output_format(args.format, config)?;
    render_session(&session, format, out, colored)
}

fn run_contrast(args: &PairArgs, out: &mut impl Write, colored: bool) -> Result<()> {
    let ratio = contrast_ratio(args.first, args.second);
    swatch::chip(out, &args.first.to_hex(), colored)?;
    write!(out, " on ")?;
    swatch::chip(out, &args.second.to_hex(), colored)?;
    writeln!(out, "  {ratio:.2}:1  {}", ContrastLevel::of(ratio))?;
    Ok(())
}

fn run_mix(args: &PairArgs, out: &mut impl Write, colored: bool) -> Result<()> {
    let mixed = FullColor::from_rgb(mix(args.first, args.second));
    swatch::color_line(out, "mix", &mixed, colored)?;
    Ok(())
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn render_session(session: &PaletteSession, format: OutputFormat, out: &mut impl Write, colored: bool) -> Result<()> {
    render(&session.active_palette(), session.color_map(), format, out, colored)?;

    let overrides = session.overrides();
    if format == OutputFormat::Text && !overrides.is_empty() {
        let pinned: Vec<&str> = Role::ALL
            .into_iter()
            .filter(|&role| overrides.contains(RoleSet::of(role)))
            .map(Role::name)
            .collect();
        writeln!(out, "pinned: {}", pinned.join(", "))?;
    }
    Ok(())
}

fn render(palette: &Palette, map: &ColorMap, format: OutputFormat, out: &mut impl Write, colored: bool) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(palette, map, out, colored)?,
        OutputFormat::Json => writeln!(out, "{}", palette_to_json(palette)?)?,
        OutputFormat::Export(format) => writeln!(out, "{}", format.render(map)?)?,
    }
    Ok(())
}

fn render_text(palette: &Palette, map: &ColorMap, out: &mut impl Write, colored: bool) -> io::Result<()> {
    swatch::palette(out, "palette", palette, colored)?;

    if let Some(base) = palette.base() {
        writeln!(out)?;
        writeln!(out, "contrast against base")?;
        for (i, color) in palette.complementary().iter().enumerate() {
            let ratio = contrast_ratio(color.rgb(), base.rgb());
            swatch::chip(out, color.hex(), colored)?;
            writeln!(out, "  color {}  {ratio:.2}:1  {}", i + 1, ContrastLevel::of(ratio))?;
        }
    }

    let mixes = golden_mixes(palette);
    if !mixes.is_empty() {
        writeln!(out)?;
        writeln!(out, "golden mixes")?;
        for (i, color) in mixes.iter().enumerate() {
            swatch::color_line(out, &format!("base + {}", i + 1), color, colored)?;
        }
    }

    writeln!(out)?;
    swatch::color_map(out, map, colored)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
