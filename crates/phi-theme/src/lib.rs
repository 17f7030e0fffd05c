//! # phi-theme: golden-angle palette and contrast engine
//!
//! Turns one base color into a palette of complementary colors, corrects
//! them toward a WCAG contrast target, and maps the result onto semantic
//! UI roles.
//!
//! # Architecture
//!
//! ```text
//! PaletteRequest (base hsl, count, auto_adjust, target)
//!     │
//!     ▼
//! pattern.rs:  golden-angle hue sequence, or a fixed harmony table
//!     │
//!     ▼
//! contrast.rs: lightness search toward the target ratio
//!     │
//!     ▼
//! palette.rs:  Palette = [base, complementary...]
//!     │
//!     ├──▶ mix.rs:      golden-mean blends of base and each color
//!     ├──▶ exchange.rs: JSON palette files
//!     ▼
//! roles.rs:    ColorMap (background, surface, primary, ...)
//!     │
//!     ▼
//! export.rs:   CSS / SCSS / design tokens
//! ```
//!
//! Everything is synchronous and owns no shared state. Deciding when a
//! palette has changed enough to discard manual role overrides is left to
//! the caller.

// Contrast math uses the standard single-letter names.
#![allow(clippy::many_single_char_names)]

pub mod contrast;
pub mod error;
pub mod exchange;
pub mod export;
pub mod mix;
pub mod palette;
pub mod pattern;
pub mod roles;

pub use contrast::{
    ContrastLevel, Direction, adjust_for_contrast, contrast_ratio, find_lightness,
    relative_luminance, step_lightness,
};
pub use error::{PaletteError, Result};
pub use exchange::{palette_from_json, palette_to_json};
pub use export::ExportFormat;
pub use mix::{golden_mixes, mix};
pub use palette::{Palette, PaletteRequest, active_palette, generate_palette};
pub use pattern::{Harmony, HarmonyChoice, generate_harmony, generate_hues};
pub use roles::{ColorMap, Role, assign_roles};
