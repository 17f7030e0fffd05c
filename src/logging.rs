// SPDX-License-Identifier: MIT
//
// Logging setup: a tracing subscriber writing to stderr.
//
// Filter precedence, highest first:
//
//   PHICOLORS_LOG (any EnvFilter directive string)
//   -v / -vv on the command line (debug / trace)
//   warn
//
// Stdout carries palette output only, so it stays safe to pipe.

use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a filter directive, e.g. `phi_theme=trace`.
pub const LOG_ENV: &str = "PHICOLORS_LOG";

/// Default directive for a `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Build the filter from an optional environment directive and a verbosity.
///
/// # Errors
///
/// Returns an error if `env` is set but is not a valid directive.
pub fn build_filter(env: Option<&str>, verbosity: u8) -> Result<EnvFilter> {
    match env {
        Some(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid {LOG_ENV} directive: {directive:?}")),
        _ => Ok(EnvFilter::new(level_for(verbosity))),
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails on an invalid `PHICOLORS_LOG` or if a subscriber is already set.
pub fn init(verbosity: u8) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(env.as_deref(), verbosity)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::debug!(verbosity, "logging initialized");
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "debug");
        assert_eq!(level_for(2), "trace");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn env_directive_wins() {
        let filter = build_filter(Some("phi_theme=trace"), 0).unwrap();
        assert_eq!(filter.to_string(), "phi_theme=trace");
    }

    #[test]
    fn blank_env_falls_back_to_verbosity() {
        let filter = build_filter(Some("  "), 1).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn invalid_env_directive_is_an_error() {
        assert!(build_filter(Some("phi_theme=loud"), 0).is_err());
    }
}
