// SPDX-License-Identifier: MIT
//
// phicolors: golden-ratio color palettes from the command line.
//
// This is the binary that wires the engine crates to a terminal:
//
//   phi-color → color value types and HSL/RGB/hex conversions
//   phi-theme → palette generation, contrast correction, roles, export
//
// A command flows through:
//
//   argv → clap → config (TOML) → PaletteSession → render → stdout / file
//
// Logging goes to stderr so palette output can be piped.

mod cli;
mod config;
mod logging;
mod session;
mod swatch;

use std::process;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(error) = logging::init(cli.verbose) {
        eprintln!("phicolors: {error:#}");
        process::exit(2);
    }

    if let Err(error) = cli::run(&cli) {
        tracing::debug!(?error, "command failed");
        eprintln!("phicolors: {error:#}");
        process::exit(1);
    }
}
