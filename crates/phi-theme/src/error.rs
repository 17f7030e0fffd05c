//! Error type for malformed input reaching the engine.
//!
//! Unreachable contrast targets are not errors: searches return `Option`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error(transparent)]
    InvalidHex(#[from] phi_color::InvalidHex),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("palette is empty")]
    EmptyPalette,

    #[error("palette entry {index} has no numeric hsl")]
    MissingHsl { index: usize },

    #[error("too many complementary colors: {count} (at most 4)")]
    TooManyColors { count: usize },

    #[error("unknown harmony: {0}")]
    UnknownHarmony(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}

#[cfg(test)]
mod tests {
    use super::PaletteError;

    #[test]
    fn invalid_hex_message_names_input() {
        let error = PaletteError::from(phi_color::InvalidHex("#12".to_owned()));
        assert_eq!(error.to_string(), "invalid hex color: \"#12\"");
    }

    #[test]
    fn too_many_colors_message() {
        let error = PaletteError::TooManyColors { count: 6 };
        assert_eq!(error.to_string(), "too many complementary colors: 6 (at most 4)");
    }
}
